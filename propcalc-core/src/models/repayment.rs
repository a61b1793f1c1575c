//! Input and output records for the loan repayment worksheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::{FormError, inputs_from_json};
use super::Fraction;
use super::fields::{FieldEntry, FieldKind, InputField, InputRecord, InputsBuilder, OutputRecord};

/// A principal-and-interest loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct RepaymentInputs {
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Decimal,
    pub annual_rate: Fraction,
    /// Loan term in years, at most 50.
    #[serde(with = "rust_decimal::serde::float")]
    pub term_years: Decimal,
}

impl RepaymentInputs {
    pub fn builder() -> InputsBuilder<Self> {
        InputsBuilder::new()
    }

    /// $720k over 30 years at 6%.
    pub fn baseline() -> Self {
        Self::builder()
            .set(RepaymentField::Principal, Decimal::new(720_000, 0))
            .set(RepaymentField::AnnualRate, Decimal::new(6, 2))
            .set(RepaymentField::TermYears, Decimal::new(30, 0))
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepaymentField {
    Principal,
    AnnualRate,
    TermYears,
}

impl InputField for RepaymentField {
    const ALL: &'static [Self] = &[Self::Principal, Self::AnnualRate, Self::TermYears];

    fn as_str(self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::AnnualRate => "annual_rate",
            Self::TermYears => "term_years",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Principal => FieldKind::Amount,
            Self::AnnualRate => FieldKind::Rate,
            Self::TermYears => FieldKind::Periods {
                max: Decimal::new(50, 0),
            },
        }
    }
}

/// Deserializing applies the same coercion and clamps as a form body.
impl TryFrom<Value> for RepaymentInputs {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        inputs_from_json(&value)
    }
}

impl InputRecord for RepaymentInputs {
    type Field = RepaymentField;

    fn get(
        &self,
        field: RepaymentField,
    ) -> FieldEntry {
        match field {
            RepaymentField::Principal => self.principal.into(),
            RepaymentField::AnnualRate => self.annual_rate.into(),
            RepaymentField::TermYears => self.term_years.into(),
        }
    }

    fn set(
        &mut self,
        field: RepaymentField,
        entry: FieldEntry,
    ) {
        let number = field.kind().normalize(entry).as_number();
        match field {
            RepaymentField::Principal => self.principal = number,
            RepaymentField::AnnualRate => self.annual_rate = Fraction::saturating(number),
            RepaymentField::TermYears => self.term_years = number,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentOutputs {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_repayment: Decimal,
    /// Every repayment over the full term.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_repaid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
}

impl OutputRecord for RepaymentOutputs {
    fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("monthly_repayment", self.monthly_repayment),
            ("total_repaid", self.total_repaid),
            ("total_interest", self.total_interest),
        ]
    }
}
