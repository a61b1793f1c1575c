//! Common utility functions for the worksheets.
//!
//! This module provides shared functionality used across the calculations,
//! including rounding and zero-guarded ratios.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use propcalc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use propcalc_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Expresses `numerator` as a percentage of `denominator`.
///
/// Returns zero when the denominator is zero or negative, or when the
/// result would overflow.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use propcalc_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(45000), dec!(900000)), dec!(5));
/// assert_eq!(percent_of(dec!(45000), dec!(0)), dec!(0));
/// ```
pub fn percent_of(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46)); // Away from zero
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(1944809.999));

        assert_eq!(result, dec!(1944810.00));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_zero() {
        assert_eq!(max(dec!(-50.00), dec!(0)), dec!(0));
    }

    // =========================================================================
    // percent_of tests
    // =========================================================================

    #[test]
    fn percent_of_divides_and_scales() {
        assert_eq!(percent_of(dec!(30000), dec!(300000)), dec!(10));
    }

    #[test]
    fn percent_of_keeps_sign_of_numerator() {
        assert_eq!(percent_of(dec!(-15000), dec!(300000)), dec!(-5));
    }

    #[test]
    fn percent_of_guards_zero_and_negative_denominators() {
        assert_eq!(percent_of(dec!(100), dec!(0)), dec!(0));
        assert_eq!(percent_of(dec!(100), dec!(-10)), dec!(0));
    }

    #[test]
    fn percent_of_returns_zero_on_overflow() {
        assert_eq!(percent_of(Decimal::MAX, dec!(0.5)), dec!(0));
    }
}
