//! Principal-and-interest loan repayments.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use super::Worksheet;
use crate::models::{Fraction, RepaymentInputs, RepaymentOutputs};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Monthly repayment that clears `principal` over `term_years`.
///
/// Uses the standard annuity formula `P·r / (1 − (1 + r)^−n)` with a monthly
/// rate `r` and `n` whole months. Returns zero when there is nothing to repay
/// or no term, and `P / n` for an interest-free loan.
///
/// # Examples
///
/// ```
/// use propcalc_core::{Fraction, monthly_repayment};
/// use propcalc_core::calculations::common::round_half_up;
/// use rust_decimal_macros::dec;
///
/// let repayment = monthly_repayment(dec!(500000), Fraction::from_entry(dec!(6)), dec!(30));
///
/// assert_eq!(round_half_up(repayment), dec!(2997.75));
/// ```
pub fn monthly_repayment(
    principal: Decimal,
    annual_rate: Fraction,
    term_years: Decimal,
) -> Decimal {
    let months = (term_years * MONTHS_PER_YEAR).trunc();
    if principal <= Decimal::ZERO || months <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let monthly_rate = annual_rate.value() / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return principal / months;
    }

    // P·r·g / (g − 1) with g = (1 + r)^n, the same as P·r / (1 − g⁻¹)
    months
        .to_u64()
        .and_then(|n| (Decimal::ONE + monthly_rate).checked_powu(n))
        .and_then(|growth| {
            let denominator = growth - Decimal::ONE;
            principal
                .checked_mul(monthly_rate)?
                .checked_mul(growth)?
                .checked_div(denominator)
        })
        .unwrap_or(Decimal::ZERO)
}

/// Calculator for the loan repayment worksheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepaymentWorksheet;

impl Worksheet for RepaymentWorksheet {
    type Input = RepaymentInputs;
    type Output = RepaymentOutputs;

    const NAME: &'static str = "repayment";
    const TITLE: &'static str = "Loan Repayment";

    fn calculate(
        &self,
        input: &RepaymentInputs,
    ) -> RepaymentOutputs {
        let monthly = monthly_repayment(input.principal, input.annual_rate, input.term_years);
        let months = (input.term_years * MONTHS_PER_YEAR).trunc();
        let total_repaid = monthly * months;
        debug!(%monthly, %months, "repayment calculated");

        RepaymentOutputs {
            monthly_repayment: monthly,
            total_repaid,
            total_interest: (total_repaid - input.principal).max(Decimal::ZERO),
        }
    }
}
