//! Field registry shared by the input records.
//!
//! Forms, CSV scenario files and CSV exports all address input fields by
//! their snake_case key. Each record lists its fields through [`InputField`]
//! and reads or writes them through [`InputRecord`], which keeps those
//! adapters generic and the normalization rules in one place.

use std::fmt;

use rust_decimal::Decimal;

use super::Fraction;

/// Largest currency amount accepted from a caller (one trillion dollars).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// How a field's raw entry is interpreted before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A currency amount, clamped to `[0, MAX_AMOUNT]`.
    Amount,
    /// A rate, normalized with [`Fraction::from_entry`].
    Rate,
    /// A number of periods (years, months, weeks), clamped to `[0, max]`.
    Periods { max: Decimal },
    /// A yes/no switch. Any non-zero number counts as yes.
    Flag,
}

impl FieldKind {
    /// Applies this kind's normalization rule to a raw entry.
    pub fn normalize(
        self,
        entry: FieldEntry,
    ) -> FieldEntry {
        match self {
            Self::Amount => FieldEntry::Number(entry.as_number().clamp(Decimal::ZERO, MAX_AMOUNT)),
            Self::Rate => FieldEntry::Number(Fraction::from_entry(entry.as_number()).value()),
            Self::Periods { max } => FieldEntry::Number(entry.as_number().clamp(Decimal::ZERO, max)),
            Self::Flag => FieldEntry::Flag(entry.as_flag()),
        }
    }
}

/// A single field value, as read from or written to an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEntry {
    Number(Decimal),
    Flag(bool),
}

impl FieldEntry {
    /// The numeric reading of this entry; flags read as 1 or 0.
    pub fn as_number(self) -> Decimal {
        match self {
            Self::Number(value) => value,
            Self::Flag(true) => Decimal::ONE,
            Self::Flag(false) => Decimal::ZERO,
        }
    }

    /// The boolean reading of this entry; numbers are true when non-zero.
    pub fn as_flag(self) -> bool {
        match self {
            Self::Number(value) => !value.is_zero(),
            Self::Flag(flag) => flag,
        }
    }
}

impl From<Decimal> for FieldEntry {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<Fraction> for FieldEntry {
    fn from(value: Fraction) -> Self {
        Self::Number(value.value())
    }
}

impl From<bool> for FieldEntry {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl fmt::Display for FieldEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value.normalize()),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

/// A named field of an input record.
pub trait InputField: Copy + Eq + fmt::Debug + 'static {
    /// Every field, in export order.
    const ALL: &'static [Self];

    /// The snake_case key used by forms and CSV files.
    fn as_str(self) -> &'static str;

    fn kind(self) -> FieldKind;

    /// Looks a field up by its key. Keys are case-sensitive.
    fn parse(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == key)
    }
}

/// An input record addressable field by field.
pub trait InputRecord: Default + Clone {
    type Field: InputField;

    fn get(
        &self,
        field: Self::Field,
    ) -> FieldEntry;

    /// Stores `entry` after applying the field's [`FieldKind`] rule.
    fn set(
        &mut self,
        field: Self::Field,
        entry: FieldEntry,
    );

    /// `(key, value)` for every field, in export order.
    fn entries(&self) -> Vec<(&'static str, FieldEntry)> {
        Self::Field::ALL
            .iter()
            .map(|&field| (field.as_str(), self.get(field)))
            .collect()
    }
}

/// An output record flattened to `(key, value)` pairs.
pub trait OutputRecord {
    fn entries(&self) -> Vec<(&'static str, Decimal)>;
}

/// Builds an input record from defaults plus explicitly supplied fields.
///
/// Every value passes through the same normalization as form input, so a
/// rate may be given as `dec!(5)` or `dec!(0.05)`.
///
/// ```
/// use propcalc_core::{FeasibilityField, FeasibilityInputs};
/// use rust_decimal_macros::dec;
///
/// let inputs = FeasibilityInputs::builder()
///     .set(FeasibilityField::LandPrice, dec!(800000))
///     .set(FeasibilityField::ContingencyPct, dec!(10))
///     .set(FeasibilityField::GstOnBuild, true)
///     .build();
///
/// assert_eq!(inputs.land_price, dec!(800000));
/// assert_eq!(inputs.contingency_pct.value(), dec!(0.10));
/// assert!(inputs.gst_on_build);
/// ```
#[derive(Debug, Clone)]
pub struct InputsBuilder<R> {
    record: R,
}

impl<R: InputRecord> InputsBuilder<R> {
    pub fn new() -> Self {
        Self {
            record: R::default(),
        }
    }

    /// Starts from an existing record instead of the defaults.
    pub fn from_record(record: R) -> Self {
        Self { record }
    }

    pub fn set(
        mut self,
        field: R::Field,
        entry: impl Into<FieldEntry>,
    ) -> Self {
        self.record.set(field, entry.into());
        self
    }

    pub fn build(self) -> R {
        self.record
    }
}

impl<R: InputRecord> Default for InputsBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn amount_is_clamped_to_accepted_range() {
        assert_eq!(
            FieldKind::Amount.normalize(FieldEntry::Number(dec!(-50))),
            FieldEntry::Number(dec!(0))
        );
        assert_eq!(
            FieldKind::Amount.normalize(FieldEntry::Number(dec!(5000000000000))),
            FieldEntry::Number(MAX_AMOUNT)
        );
        assert_eq!(
            FieldKind::Amount.normalize(FieldEntry::Number(dec!(1234.5))),
            FieldEntry::Number(dec!(1234.5))
        );
    }

    #[test]
    fn rate_accepts_both_spellings() {
        assert_eq!(
            FieldKind::Rate.normalize(FieldEntry::Number(dec!(6))),
            FieldEntry::Number(dec!(0.06))
        );
        assert_eq!(
            FieldKind::Rate.normalize(FieldEntry::Number(dec!(0.06))),
            FieldEntry::Number(dec!(0.06))
        );
    }

    #[test]
    fn periods_are_clamped_to_max() {
        let kind = FieldKind::Periods { max: dec!(52) };

        assert_eq!(
            kind.normalize(FieldEntry::Number(dec!(60))),
            FieldEntry::Number(dec!(52))
        );
        assert_eq!(
            kind.normalize(FieldEntry::Number(dec!(-1))),
            FieldEntry::Number(dec!(0))
        );
    }

    #[test]
    fn flag_reads_numbers_as_non_zero() {
        assert_eq!(
            FieldKind::Flag.normalize(FieldEntry::Number(dec!(2))),
            FieldEntry::Flag(true)
        );
        assert_eq!(
            FieldKind::Flag.normalize(FieldEntry::Number(dec!(0))),
            FieldEntry::Flag(false)
        );
    }

    #[test]
    fn numeric_fields_read_flags_as_one_or_zero() {
        assert_eq!(
            FieldKind::Amount.normalize(FieldEntry::Flag(true)),
            FieldEntry::Number(dec!(1))
        );
    }

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(FieldEntry::Number(dec!(0.100)).to_string(), "0.1");
        assert_eq!(FieldEntry::Flag(true).to_string(), "true");
    }
}
