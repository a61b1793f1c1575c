//! Rates expressed as fractions in `[0, 1]`.
//!
//! Form fields for rates arrive either as fractions (`0.05`) or as whole
//! percents (`5`). [`normalize_fraction`] resolves the two spellings once, at
//! the input boundary, and [`Fraction`] carries the result into the
//! worksheets.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Interprets a rate entered either as a fraction or as a whole percent.
///
/// - `value <= 0` yields zero.
/// - `value > 1` is read as a percent and divided by 100.
/// - Anything else is already a fraction and is returned unchanged.
///
/// Exactly `1` is ambiguous (100% or 1%) and is read as 100%.
///
/// # Examples
///
/// ```
/// use propcalc_core::normalize_fraction;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(normalize_fraction(dec!(5)), dec!(0.05));
/// assert_eq!(normalize_fraction(dec!(0.05)), dec!(0.05));
/// assert_eq!(normalize_fraction(dec!(1)), dec!(1));
/// assert_eq!(normalize_fraction(dec!(-3)), dec!(0));
/// ```
pub fn normalize_fraction(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        Decimal::ZERO
    } else if value > Decimal::ONE {
        value / Decimal::ONE_HUNDRED
    } else {
        value
    }
}

/// A rate in `[0, 1]`.
///
/// Serializes as a plain JSON number. Deserializing accepts either spelling
/// and normalizes it like [`Fraction::from_entry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(Decimal);

impl Fraction {
    pub const ZERO: Fraction = Fraction(Decimal::ZERO);
    pub const ONE: Fraction = Fraction(Decimal::ONE);

    /// Wraps `value` if it already lies in `[0, 1]`.
    pub fn new(value: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Clamps `value` into `[0, 1]`.
    pub fn saturating(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// Builds a fraction from a raw form entry, accepting fractions or whole
    /// percents. Percents above 100 saturate at one.
    pub fn from_entry(value: Decimal) -> Self {
        Self::saturating(normalize_fraction(value))
    }

    /// [`Fraction::from_entry`] for binary floats. NaN and infinities yield zero.
    pub fn from_f64_entry(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Decimal::from_f64(value)
            .map(Self::from_entry)
            .unwrap_or(Self::ZERO)
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    /// `1 - self`.
    pub fn complement(self) -> Decimal {
        Decimal::ONE - self.0
    }

    pub fn is_full(self) -> bool {
        self.0 >= Decimal::ONE
    }

    pub fn as_percent(self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Fraction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Fraction> for Decimal {
    fn from(fraction: Fraction) -> Self {
        fraction.0
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_f64_entry)
    }
}
