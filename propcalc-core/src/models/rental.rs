//! Input and output records for the rental ROI worksheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::{FormError, inputs_from_json};
use super::Fraction;
use super::fields::{FieldEntry, FieldKind, InputField, InputRecord, InputsBuilder, OutputRecord};

/// Inputs for one year of a buy-and-hold rental.
///
/// Expense amounts are annual. The loan is modelled as interest-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct RentalInputs {
    #[serde(with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub stamp_duty: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub closing_costs: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub rent_per_week: Decimal,
    /// Weeks per year the property sits empty, at most 52.
    #[serde(with = "rust_decimal::serde::float")]
    pub vacancy_weeks: Decimal,
    /// Management fee as a share of gross rent.
    pub property_management_pct: Fraction,

    #[serde(with = "rust_decimal::serde::float")]
    pub maintenance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub council_rates: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub body_corporate: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub loan_amount: Decimal,
    pub interest_rate: Fraction,

    /// Investor's marginal tax rate; zero ignores tax entirely.
    pub marginal_tax_rate: Fraction,
    /// Depreciation claimed this year. Reduces taxable profit, not cash.
    #[serde(with = "rust_decimal::serde::float")]
    pub depreciation: Decimal,
}

pub type RentalInputsBuilder = InputsBuilder<RentalInputs>;

impl RentalInputs {
    pub fn builder() -> RentalInputsBuilder {
        InputsBuilder::new()
    }

    /// A sample $900k rental used to pre-fill forms.
    pub fn baseline() -> Self {
        Self::builder()
            .set(RentalField::PurchasePrice, Decimal::new(900_000, 0))
            .set(RentalField::StampDuty, Decimal::new(35_000, 0))
            .set(RentalField::ClosingCosts, Decimal::new(2_500, 0))
            .set(RentalField::RentPerWeek, Decimal::new(900, 0))
            .set(RentalField::VacancyWeeks, Decimal::new(2, 0))
            .set(RentalField::PropertyManagementPct, Decimal::new(6, 2))
            .set(RentalField::Maintenance, Decimal::new(2_000, 0))
            .set(RentalField::Insurance, Decimal::new(1_800, 0))
            .set(RentalField::CouncilRates, Decimal::new(2_200, 0))
            .set(RentalField::LoanAmount, Decimal::new(720_000, 0))
            .set(RentalField::InterestRate, Decimal::new(6, 2))
            .set(RentalField::MarginalTaxRate, Decimal::new(37, 2))
            .set(RentalField::Depreciation, Decimal::new(8_000, 0))
            .build()
    }
}

/// Field keys of [`RentalInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RentalField {
    PurchasePrice,
    StampDuty,
    ClosingCosts,
    RentPerWeek,
    VacancyWeeks,
    PropertyManagementPct,
    Maintenance,
    Insurance,
    CouncilRates,
    BodyCorporate,
    LoanAmount,
    InterestRate,
    MarginalTaxRate,
    Depreciation,
}

impl InputField for RentalField {
    const ALL: &'static [Self] = &[
        Self::PurchasePrice,
        Self::StampDuty,
        Self::ClosingCosts,
        Self::RentPerWeek,
        Self::VacancyWeeks,
        Self::PropertyManagementPct,
        Self::Maintenance,
        Self::Insurance,
        Self::CouncilRates,
        Self::BodyCorporate,
        Self::LoanAmount,
        Self::InterestRate,
        Self::MarginalTaxRate,
        Self::Depreciation,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PurchasePrice => "purchase_price",
            Self::StampDuty => "stamp_duty",
            Self::ClosingCosts => "closing_costs",
            Self::RentPerWeek => "rent_per_week",
            Self::VacancyWeeks => "vacancy_weeks",
            Self::PropertyManagementPct => "property_management_pct",
            Self::Maintenance => "maintenance",
            Self::Insurance => "insurance",
            Self::CouncilRates => "council_rates",
            Self::BodyCorporate => "body_corporate",
            Self::LoanAmount => "loan_amount",
            Self::InterestRate => "interest_rate",
            Self::MarginalTaxRate => "marginal_tax_rate",
            Self::Depreciation => "depreciation",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::PropertyManagementPct | Self::InterestRate | Self::MarginalTaxRate => {
                FieldKind::Rate
            }
            Self::VacancyWeeks => FieldKind::Periods {
                max: Decimal::new(52, 0),
            },
            _ => FieldKind::Amount,
        }
    }
}

/// Deserializing applies the same coercion and clamps as a form body.
impl TryFrom<Value> for RentalInputs {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        inputs_from_json(&value)
    }
}

impl InputRecord for RentalInputs {
    type Field = RentalField;

    fn get(
        &self,
        field: RentalField,
    ) -> FieldEntry {
        match field {
            RentalField::PurchasePrice => self.purchase_price.into(),
            RentalField::StampDuty => self.stamp_duty.into(),
            RentalField::ClosingCosts => self.closing_costs.into(),
            RentalField::RentPerWeek => self.rent_per_week.into(),
            RentalField::VacancyWeeks => self.vacancy_weeks.into(),
            RentalField::PropertyManagementPct => self.property_management_pct.into(),
            RentalField::Maintenance => self.maintenance.into(),
            RentalField::Insurance => self.insurance.into(),
            RentalField::CouncilRates => self.council_rates.into(),
            RentalField::BodyCorporate => self.body_corporate.into(),
            RentalField::LoanAmount => self.loan_amount.into(),
            RentalField::InterestRate => self.interest_rate.into(),
            RentalField::MarginalTaxRate => self.marginal_tax_rate.into(),
            RentalField::Depreciation => self.depreciation.into(),
        }
    }

    fn set(
        &mut self,
        field: RentalField,
        entry: FieldEntry,
    ) {
        let number = field.kind().normalize(entry).as_number();
        match field {
            RentalField::PurchasePrice => self.purchase_price = number,
            RentalField::StampDuty => self.stamp_duty = number,
            RentalField::ClosingCosts => self.closing_costs = number,
            RentalField::RentPerWeek => self.rent_per_week = number,
            RentalField::VacancyWeeks => self.vacancy_weeks = number,
            RentalField::PropertyManagementPct => {
                self.property_management_pct = Fraction::saturating(number)
            }
            RentalField::Maintenance => self.maintenance = number,
            RentalField::Insurance => self.insurance = number,
            RentalField::CouncilRates => self.council_rates = number,
            RentalField::BodyCorporate => self.body_corporate = number,
            RentalField::LoanAmount => self.loan_amount = number,
            RentalField::InterestRate => self.interest_rate = Fraction::saturating(number),
            RentalField::MarginalTaxRate => self.marginal_tax_rate = Fraction::saturating(number),
            RentalField::Depreciation => self.depreciation = number,
        }
    }
}

/// Results of the rental ROI worksheet for a single year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalOutputs {
    /// Rent collected over the occupied weeks.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_rental_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub operating_expenses: Decimal,
    /// Gross income less operating expenses, before debt service.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_operating_income: Decimal,
    /// Interest-only loan cost for the year.
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_debt_service: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cashflow_before_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_profit: Decimal,
    /// Positive for a refund (a loss offset against other income), negative
    /// for tax payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_effect: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cashflow_after_tax: Decimal,
    /// Purchase costs not covered by the loan.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_initial_cash: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_yield_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_yield_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_on_cash_pct: Decimal,
}

impl OutputRecord for RentalOutputs {
    fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("gross_rental_income", self.gross_rental_income),
            ("operating_expenses", self.operating_expenses),
            ("net_operating_income", self.net_operating_income),
            ("annual_debt_service", self.annual_debt_service),
            ("cashflow_before_tax", self.cashflow_before_tax),
            ("taxable_profit", self.taxable_profit),
            ("tax_effect", self.tax_effect),
            ("cashflow_after_tax", self.cashflow_after_tax),
            ("total_initial_cash", self.total_initial_cash),
            ("gross_yield_pct", self.gross_yield_pct),
            ("net_yield_pct", self.net_yield_pct),
            ("cash_on_cash_pct", self.cash_on_cash_pct),
        ]
    }
}
