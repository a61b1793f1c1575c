//! Input and output records for the build/feasibility worksheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::{FormError, inputs_from_json};
use super::fields::{FieldEntry, FieldKind, InputField, InputRecord, InputsBuilder, OutputRecord};
use super::Fraction;

/// Inputs for a knockdown-rebuild or land-development scenario.
///
/// Amounts are AUD. Rates are [`Fraction`]s. Holding costs are annual unless
/// the field name says otherwise. Every field defaults to zero or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct FeasibilityInputs {
    // Acquisition
    /// Purchase price of the land.
    #[serde(with = "rust_decimal::serde::float")]
    pub land_price: Decimal,
    /// Stamp duty paid on the land purchase.
    #[serde(with = "rust_decimal::serde::float")]
    pub stamp_duty: Decimal,
    /// Conveyancing and legal fees on purchase.
    #[serde(with = "rust_decimal::serde::float")]
    pub legal_fees_purchase: Decimal,

    // Direct construction and site costs
    /// Contract price of the build. GST is charged on this amount alone.
    #[serde(with = "rust_decimal::serde::float")]
    pub build_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub demolition: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub excavation: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tree_rock_removal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub traffic_control: Decimal,
    /// Contaminated soil or asbestos remediation.
    #[serde(with = "rust_decimal::serde::float")]
    pub remediation: Decimal,
    /// Geotechnical investigation.
    #[serde(with = "rust_decimal::serde::float")]
    pub geotech: Decimal,
    /// BASIX or equivalent energy compliance works.
    #[serde(with = "rust_decimal::serde::float")]
    pub sustainability_compliance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub utility_connection: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub driveway_landscaping: Decimal,
    /// Allowance for contract variations.
    #[serde(with = "rust_decimal::serde::float")]
    pub variations_allowance: Decimal,

    // Construction rates
    /// Contingency applied to the direct construction costs.
    pub contingency_pct: Fraction,
    /// Whether GST is payable on the build contract.
    pub gst_on_build: bool,
    pub gst_rate: Fraction,

    // Professional fees (legal_fees_purchase is counted here too)
    #[serde(with = "rust_decimal::serde::float")]
    pub architect_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub engineering_fees: Decimal,
    /// Development application and council fees.
    #[serde(with = "rust_decimal::serde::float")]
    pub council_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub certifier_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub surveyor_fees: Decimal,

    // Finance
    /// Cash invested. ROI is measured against this figure.
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit: Decimal,
    /// Annual interest rate on the construction loan.
    pub loan_interest_rate: Fraction,
    /// Length of the build, in months.
    #[serde(with = "rust_decimal::serde::float")]
    pub construction_months: Decimal,
    /// Upfront loan establishment fees.
    #[serde(with = "rust_decimal::serde::float")]
    pub bank_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub valuation_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mortgage_insurance: Decimal,

    // Holding
    /// Annual council rates while holding.
    #[serde(with = "rust_decimal::serde::float")]
    pub council_rates: Decimal,
    /// Annual insurance while holding.
    #[serde(with = "rust_decimal::serde::float")]
    pub insurance: Decimal,
    /// Monthly utilities while holding.
    #[serde(with = "rust_decimal::serde::float")]
    pub utilities_monthly: Decimal,
    /// Annual property management while holding.
    #[serde(with = "rust_decimal::serde::float")]
    pub property_management: Decimal,
    /// Years between completion and sale.
    #[serde(with = "rust_decimal::serde::float")]
    pub hold_years: Decimal,

    // Sale
    pub annual_market_growth: Fraction,
    pub agent_commission_pct: Fraction,
    #[serde(with = "rust_decimal::serde::float")]
    pub sales_legal_fees: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub marketing_costs: Decimal,

    // Tax
    /// Informational only. `owner_occupied_share_pct` alone drives the exemption.
    pub is_owner_occupied: bool,
    /// Share of the gain exempt as a main residence.
    pub owner_occupied_share_pct: Fraction,
    /// Halve the taxable gain for holds of a year or more.
    pub apply_cgt_discount: bool,
    /// Effective tax rate applied to the taxable gain.
    pub taxable_profit_rate: Fraction,
}

pub type FeasibilityInputsBuilder = InputsBuilder<FeasibilityInputs>;

impl FeasibilityInputs {
    pub fn builder() -> FeasibilityInputsBuilder {
        InputsBuilder::new()
    }

    /// A sample knockdown-rebuild used to pre-fill forms.
    ///
    /// An owner-occupier spends $800k on land and $800k on direct costs,
    /// holds for three years at 5% growth and sells through an agent.
    pub fn baseline() -> Self {
        Self::builder()
            .set(FeasibilityField::LandPrice, Decimal::new(800_000, 0))
            .set(FeasibilityField::StampDuty, Decimal::new(44_000, 0))
            .set(FeasibilityField::BuildCost, Decimal::new(750_000, 0))
            .set(FeasibilityField::Demolition, Decimal::new(20_000, 0))
            .set(FeasibilityField::DrivewayLandscaping, Decimal::new(20_000, 0))
            .set(FeasibilityField::VariationsAllowance, Decimal::new(10_000, 0))
            .set(FeasibilityField::ContingencyPct, Decimal::new(10, 2))
            .set(FeasibilityField::Deposit, Decimal::new(300_000, 0))
            .set(FeasibilityField::HoldYears, Decimal::new(3, 0))
            .set(FeasibilityField::AnnualMarketGrowth, Decimal::new(5, 2))
            .set(FeasibilityField::AgentCommissionPct, Decimal::new(2, 2))
            .set(FeasibilityField::IsOwnerOccupied, true)
            .set(FeasibilityField::OwnerOccupiedSharePct, Decimal::ONE)
            .set(FeasibilityField::ApplyCgtDiscount, true)
            .set(FeasibilityField::TaxableProfitRate, Decimal::new(25, 2))
            .build()
    }
}

/// Field keys of [`FeasibilityInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeasibilityField {
    LandPrice,
    StampDuty,
    LegalFeesPurchase,
    BuildCost,
    Demolition,
    Excavation,
    TreeRockRemoval,
    TrafficControl,
    Remediation,
    Geotech,
    SustainabilityCompliance,
    UtilityConnection,
    DrivewayLandscaping,
    VariationsAllowance,
    ContingencyPct,
    GstOnBuild,
    GstRate,
    ArchitectFees,
    EngineeringFees,
    CouncilFees,
    CertifierFees,
    SurveyorFees,
    Deposit,
    LoanInterestRate,
    ConstructionMonths,
    BankFees,
    ValuationFees,
    MortgageInsurance,
    CouncilRates,
    Insurance,
    UtilitiesMonthly,
    PropertyManagement,
    HoldYears,
    AnnualMarketGrowth,
    AgentCommissionPct,
    SalesLegalFees,
    MarketingCosts,
    IsOwnerOccupied,
    OwnerOccupiedSharePct,
    ApplyCgtDiscount,
    TaxableProfitRate,
}

impl InputField for FeasibilityField {
    const ALL: &'static [Self] = &[
        Self::LandPrice,
        Self::StampDuty,
        Self::LegalFeesPurchase,
        Self::BuildCost,
        Self::Demolition,
        Self::Excavation,
        Self::TreeRockRemoval,
        Self::TrafficControl,
        Self::Remediation,
        Self::Geotech,
        Self::SustainabilityCompliance,
        Self::UtilityConnection,
        Self::DrivewayLandscaping,
        Self::VariationsAllowance,
        Self::ContingencyPct,
        Self::GstOnBuild,
        Self::GstRate,
        Self::ArchitectFees,
        Self::EngineeringFees,
        Self::CouncilFees,
        Self::CertifierFees,
        Self::SurveyorFees,
        Self::Deposit,
        Self::LoanInterestRate,
        Self::ConstructionMonths,
        Self::BankFees,
        Self::ValuationFees,
        Self::MortgageInsurance,
        Self::CouncilRates,
        Self::Insurance,
        Self::UtilitiesMonthly,
        Self::PropertyManagement,
        Self::HoldYears,
        Self::AnnualMarketGrowth,
        Self::AgentCommissionPct,
        Self::SalesLegalFees,
        Self::MarketingCosts,
        Self::IsOwnerOccupied,
        Self::OwnerOccupiedSharePct,
        Self::ApplyCgtDiscount,
        Self::TaxableProfitRate,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::LandPrice => "land_price",
            Self::StampDuty => "stamp_duty",
            Self::LegalFeesPurchase => "legal_fees_purchase",
            Self::BuildCost => "build_cost",
            Self::Demolition => "demolition",
            Self::Excavation => "excavation",
            Self::TreeRockRemoval => "tree_rock_removal",
            Self::TrafficControl => "traffic_control",
            Self::Remediation => "remediation",
            Self::Geotech => "geotech",
            Self::SustainabilityCompliance => "sustainability_compliance",
            Self::UtilityConnection => "utility_connection",
            Self::DrivewayLandscaping => "driveway_landscaping",
            Self::VariationsAllowance => "variations_allowance",
            Self::ContingencyPct => "contingency_pct",
            Self::GstOnBuild => "gst_on_build",
            Self::GstRate => "gst_rate",
            Self::ArchitectFees => "architect_fees",
            Self::EngineeringFees => "engineering_fees",
            Self::CouncilFees => "council_fees",
            Self::CertifierFees => "certifier_fees",
            Self::SurveyorFees => "surveyor_fees",
            Self::Deposit => "deposit",
            Self::LoanInterestRate => "loan_interest_rate",
            Self::ConstructionMonths => "construction_months",
            Self::BankFees => "bank_fees",
            Self::ValuationFees => "valuation_fees",
            Self::MortgageInsurance => "mortgage_insurance",
            Self::CouncilRates => "council_rates",
            Self::Insurance => "insurance",
            Self::UtilitiesMonthly => "utilities_monthly",
            Self::PropertyManagement => "property_management",
            Self::HoldYears => "hold_years",
            Self::AnnualMarketGrowth => "annual_market_growth",
            Self::AgentCommissionPct => "agent_commission_pct",
            Self::SalesLegalFees => "sales_legal_fees",
            Self::MarketingCosts => "marketing_costs",
            Self::IsOwnerOccupied => "is_owner_occupied",
            Self::OwnerOccupiedSharePct => "owner_occupied_share_pct",
            Self::ApplyCgtDiscount => "apply_cgt_discount",
            Self::TaxableProfitRate => "taxable_profit_rate",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::ContingencyPct
            | Self::GstRate
            | Self::LoanInterestRate
            | Self::AnnualMarketGrowth
            | Self::AgentCommissionPct
            | Self::OwnerOccupiedSharePct
            | Self::TaxableProfitRate => FieldKind::Rate,
            Self::GstOnBuild | Self::IsOwnerOccupied | Self::ApplyCgtDiscount => FieldKind::Flag,
            Self::ConstructionMonths => FieldKind::Periods {
                max: Decimal::new(120, 0),
            },
            Self::HoldYears => FieldKind::Periods {
                max: Decimal::new(50, 0),
            },
            _ => FieldKind::Amount,
        }
    }
}

/// Deserializing applies the same coercion and clamps as a form body.
impl TryFrom<Value> for FeasibilityInputs {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        inputs_from_json(&value)
    }
}

impl InputRecord for FeasibilityInputs {
    type Field = FeasibilityField;

    fn get(
        &self,
        field: FeasibilityField,
    ) -> FieldEntry {
        match field {
            FeasibilityField::LandPrice => self.land_price.into(),
            FeasibilityField::StampDuty => self.stamp_duty.into(),
            FeasibilityField::LegalFeesPurchase => self.legal_fees_purchase.into(),
            FeasibilityField::BuildCost => self.build_cost.into(),
            FeasibilityField::Demolition => self.demolition.into(),
            FeasibilityField::Excavation => self.excavation.into(),
            FeasibilityField::TreeRockRemoval => self.tree_rock_removal.into(),
            FeasibilityField::TrafficControl => self.traffic_control.into(),
            FeasibilityField::Remediation => self.remediation.into(),
            FeasibilityField::Geotech => self.geotech.into(),
            FeasibilityField::SustainabilityCompliance => self.sustainability_compliance.into(),
            FeasibilityField::UtilityConnection => self.utility_connection.into(),
            FeasibilityField::DrivewayLandscaping => self.driveway_landscaping.into(),
            FeasibilityField::VariationsAllowance => self.variations_allowance.into(),
            FeasibilityField::ContingencyPct => self.contingency_pct.into(),
            FeasibilityField::GstOnBuild => self.gst_on_build.into(),
            FeasibilityField::GstRate => self.gst_rate.into(),
            FeasibilityField::ArchitectFees => self.architect_fees.into(),
            FeasibilityField::EngineeringFees => self.engineering_fees.into(),
            FeasibilityField::CouncilFees => self.council_fees.into(),
            FeasibilityField::CertifierFees => self.certifier_fees.into(),
            FeasibilityField::SurveyorFees => self.surveyor_fees.into(),
            FeasibilityField::Deposit => self.deposit.into(),
            FeasibilityField::LoanInterestRate => self.loan_interest_rate.into(),
            FeasibilityField::ConstructionMonths => self.construction_months.into(),
            FeasibilityField::BankFees => self.bank_fees.into(),
            FeasibilityField::ValuationFees => self.valuation_fees.into(),
            FeasibilityField::MortgageInsurance => self.mortgage_insurance.into(),
            FeasibilityField::CouncilRates => self.council_rates.into(),
            FeasibilityField::Insurance => self.insurance.into(),
            FeasibilityField::UtilitiesMonthly => self.utilities_monthly.into(),
            FeasibilityField::PropertyManagement => self.property_management.into(),
            FeasibilityField::HoldYears => self.hold_years.into(),
            FeasibilityField::AnnualMarketGrowth => self.annual_market_growth.into(),
            FeasibilityField::AgentCommissionPct => self.agent_commission_pct.into(),
            FeasibilityField::SalesLegalFees => self.sales_legal_fees.into(),
            FeasibilityField::MarketingCosts => self.marketing_costs.into(),
            FeasibilityField::IsOwnerOccupied => self.is_owner_occupied.into(),
            FeasibilityField::OwnerOccupiedSharePct => self.owner_occupied_share_pct.into(),
            FeasibilityField::ApplyCgtDiscount => self.apply_cgt_discount.into(),
            FeasibilityField::TaxableProfitRate => self.taxable_profit_rate.into(),
        }
    }

    fn set(
        &mut self,
        field: FeasibilityField,
        entry: FieldEntry,
    ) {
        let entry = field.kind().normalize(entry);
        let number = entry.as_number();
        match field {
            FeasibilityField::LandPrice => self.land_price = number,
            FeasibilityField::StampDuty => self.stamp_duty = number,
            FeasibilityField::LegalFeesPurchase => self.legal_fees_purchase = number,
            FeasibilityField::BuildCost => self.build_cost = number,
            FeasibilityField::Demolition => self.demolition = number,
            FeasibilityField::Excavation => self.excavation = number,
            FeasibilityField::TreeRockRemoval => self.tree_rock_removal = number,
            FeasibilityField::TrafficControl => self.traffic_control = number,
            FeasibilityField::Remediation => self.remediation = number,
            FeasibilityField::Geotech => self.geotech = number,
            FeasibilityField::SustainabilityCompliance => self.sustainability_compliance = number,
            FeasibilityField::UtilityConnection => self.utility_connection = number,
            FeasibilityField::DrivewayLandscaping => self.driveway_landscaping = number,
            FeasibilityField::VariationsAllowance => self.variations_allowance = number,
            FeasibilityField::ContingencyPct => self.contingency_pct = Fraction::saturating(number),
            FeasibilityField::GstOnBuild => self.gst_on_build = entry.as_flag(),
            FeasibilityField::GstRate => self.gst_rate = Fraction::saturating(number),
            FeasibilityField::ArchitectFees => self.architect_fees = number,
            FeasibilityField::EngineeringFees => self.engineering_fees = number,
            FeasibilityField::CouncilFees => self.council_fees = number,
            FeasibilityField::CertifierFees => self.certifier_fees = number,
            FeasibilityField::SurveyorFees => self.surveyor_fees = number,
            FeasibilityField::Deposit => self.deposit = number,
            FeasibilityField::LoanInterestRate => self.loan_interest_rate = Fraction::saturating(number),
            FeasibilityField::ConstructionMonths => self.construction_months = number,
            FeasibilityField::BankFees => self.bank_fees = number,
            FeasibilityField::ValuationFees => self.valuation_fees = number,
            FeasibilityField::MortgageInsurance => self.mortgage_insurance = number,
            FeasibilityField::CouncilRates => self.council_rates = number,
            FeasibilityField::Insurance => self.insurance = number,
            FeasibilityField::UtilitiesMonthly => self.utilities_monthly = number,
            FeasibilityField::PropertyManagement => self.property_management = number,
            FeasibilityField::HoldYears => self.hold_years = number,
            FeasibilityField::AnnualMarketGrowth => self.annual_market_growth = Fraction::saturating(number),
            FeasibilityField::AgentCommissionPct => self.agent_commission_pct = Fraction::saturating(number),
            FeasibilityField::SalesLegalFees => self.sales_legal_fees = number,
            FeasibilityField::MarketingCosts => self.marketing_costs = number,
            FeasibilityField::IsOwnerOccupied => self.is_owner_occupied = entry.as_flag(),
            FeasibilityField::OwnerOccupiedSharePct => self.owner_occupied_share_pct = Fraction::saturating(number),
            FeasibilityField::ApplyCgtDiscount => self.apply_cgt_discount = entry.as_flag(),
            FeasibilityField::TaxableProfitRate => self.taxable_profit_rate = Fraction::saturating(number),
        }
    }
}

/// Results of the feasibility worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityOutputs {
    /// Direct construction costs plus contingency.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal_construction: Decimal,
    /// Professional fees, without contingency.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal_professional: Decimal,
    /// GST on the build contract.
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_amount: Decimal,
    /// Land price plus stamp duty and purchase legal fees.
    #[serde(with = "rust_decimal::serde::float")]
    pub acquisition_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost_before_finance: Decimal,
    /// Construction interest plus loan fees.
    #[serde(with = "rust_decimal::serde::float")]
    pub finance_cost: Decimal,
    /// Holding costs over the whole hold period.
    #[serde(with = "rust_decimal::serde::float")]
    pub holding_cost: Decimal,
    /// All-in cost: before finance, plus finance and holding.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_project_cost: Decimal,
    /// Land plus construction, grown at the market rate for the hold period.
    #[serde(with = "rust_decimal::serde::float")]
    pub resale_after_hold_years: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_costs: Decimal,
    /// Resale value less selling costs, before tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_sale_proceeds: Decimal,
    /// Estimated capital gains tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit_after_tax: Decimal,
    /// Net profit after tax as a percentage of the deposit.
    #[serde(with = "rust_decimal::serde::float")]
    pub roi_percent: Decimal,
}

impl OutputRecord for FeasibilityOutputs {
    fn entries(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("subtotal_construction", self.subtotal_construction),
            ("subtotal_professional", self.subtotal_professional),
            ("gst_amount", self.gst_amount),
            ("acquisition_cost", self.acquisition_cost),
            ("total_cost_before_finance", self.total_cost_before_finance),
            ("finance_cost", self.finance_cost),
            ("holding_cost", self.holding_cost),
            ("total_project_cost", self.total_project_cost),
            ("resale_after_hold_years", self.resale_after_hold_years),
            ("selling_costs", self.selling_costs),
            ("net_sale_proceeds", self.net_sale_proceeds),
            ("estimated_tax", self.estimated_tax),
            ("net_profit_after_tax", self.net_profit_after_tax),
            ("roi_percent", self.roi_percent),
        ]
    }
}
