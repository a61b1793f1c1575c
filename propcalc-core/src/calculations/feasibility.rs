//! Build/feasibility worksheet.
//!
//! Prices a knockdown-rebuild or land development held for a number of years
//! and then sold, down to an after-tax ROI on the cash deposit.
//!
//! # Worksheet Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Direct construction and site costs (eleven fields) |
//! | 2    | Contingency (step 1 × contingency rate) |
//! | 3    | Construction subtotal (step 1 + step 2) |
//! | 4    | Professional fees subtotal, no contingency |
//! | 5    | GST on the raw build cost, when GST applies |
//! | 6    | Acquisition cost (land + stamp duty + purchase legal fees) |
//! | 7    | Total cost before finance (steps 3 + 4 + 5 + 6) |
//! | 8    | Finance cost: interest on half the construction subtotal over the build, plus loan fees |
//! | 9    | Holding cost over the hold period |
//! | 10   | Total project cost (steps 7 + 8 + 9) |
//! | 11   | Resale value: land plus construction, compounded at market growth |
//! | 12   | Selling costs and net sale proceeds |
//! | 13   | Taxable gain after main-residence exemption and CGT discount |
//! | 14   | Estimated tax |
//! | 15   | Net profit after tax and ROI on the deposit |
//!
//! # Example
//!
//! ```
//! use propcalc_core::{FeasibilityInputs, calculate_feasibility};
//! use rust_decimal_macros::dec;
//!
//! let outputs = calculate_feasibility(&FeasibilityInputs::baseline());
//!
//! assert_eq!(outputs.subtotal_construction, dec!(880000));
//! assert_eq!(outputs.resale_after_hold_years, dec!(1944810));
//! assert_eq!(outputs.estimated_tax, dec!(0));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;
use tracing::debug;

use super::Worksheet;
use super::common::{max, percent_of};
use crate::models::{FeasibilityInputs, FeasibilityOutputs, Fraction};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The worksheet's outputs together with the intermediate figures behind
/// them, for reports that show their working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeasibilityBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub direct_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub contingency: Decimal,
    /// All-in cost less the deposit; the financed portion counts as basis.
    #[serde(with = "rust_decimal::serde::float")]
    pub project_basis: Decimal,
    /// Gain before exemption and discount, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_gain: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_gain: Decimal,
    pub outputs: FeasibilityOutputs,
}

/// Calculator for the build/feasibility worksheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityWorksheet;

impl FeasibilityWorksheet {
    pub fn new() -> Self {
        Self
    }

    /// Runs every step and returns the outputs with their intermediates.
    pub fn breakdown(
        &self,
        input: &FeasibilityInputs,
    ) -> FeasibilityBreakdown {
        let direct_costs = self.direct_costs(input);
        let contingency = self.contingency(direct_costs, input.contingency_pct);
        let subtotal_construction = direct_costs + contingency;
        let subtotal_professional = self.professional_fees(input);
        let gst_amount = self.gst(input);
        let acquisition_cost = self.acquisition_cost(input);

        let total_cost_before_finance =
            acquisition_cost + subtotal_construction + subtotal_professional + gst_amount;

        let finance_cost = self.finance_cost(input, subtotal_construction);
        let holding_cost = self.holding_cost(input);
        let total_project_cost = total_cost_before_finance + finance_cost + holding_cost;

        let resale_after_hold_years = self.resale_value(
            input.land_price + subtotal_construction,
            input.annual_market_growth,
            input.hold_years,
        );
        let selling_costs = self.selling_costs(resale_after_hold_years, input);
        let net_sale_proceeds = resale_after_hold_years - selling_costs;

        let project_basis = total_project_cost - input.deposit;
        let raw_gain = max(net_sale_proceeds - project_basis, Decimal::ZERO);
        let taxable_gain = self.taxable_gain(raw_gain, input);
        let estimated_tax = self.estimated_tax(
            taxable_gain,
            input.owner_occupied_share_pct,
            input.taxable_profit_rate,
        );

        let net_profit_after_tax = net_sale_proceeds - total_project_cost - estimated_tax;
        let roi_percent = percent_of(net_profit_after_tax, input.deposit);

        debug!(
            %total_project_cost,
            %net_sale_proceeds,
            %estimated_tax,
            %roi_percent,
            "feasibility calculated"
        );

        FeasibilityBreakdown {
            direct_costs,
            contingency,
            project_basis,
            raw_gain,
            taxable_gain,
            outputs: FeasibilityOutputs {
                subtotal_construction,
                subtotal_professional,
                gst_amount,
                acquisition_cost,
                total_cost_before_finance,
                finance_cost,
                holding_cost,
                total_project_cost,
                resale_after_hold_years,
                selling_costs,
                net_sale_proceeds,
                estimated_tax,
                net_profit_after_tax,
                roi_percent,
            },
        }
    }

    /// Sums the eleven direct construction and site cost fields.
    fn direct_costs(
        &self,
        input: &FeasibilityInputs,
    ) -> Decimal {
        [
            input.build_cost,
            input.demolition,
            input.excavation,
            input.tree_rock_removal,
            input.traffic_control,
            input.remediation,
            input.geotech,
            input.sustainability_compliance,
            input.utility_connection,
            input.driveway_landscaping,
            input.variations_allowance,
        ]
        .into_iter()
        .sum()
    }

    fn contingency(
        &self,
        direct_costs: Decimal,
        rate: Fraction,
    ) -> Decimal {
        direct_costs * rate.value()
    }

    /// Sums the professional fees. Purchase legal fees are counted here as
    /// well as in the acquisition cost.
    fn professional_fees(
        &self,
        input: &FeasibilityInputs,
    ) -> Decimal {
        [
            input.architect_fees,
            input.engineering_fees,
            input.council_fees,
            input.certifier_fees,
            input.surveyor_fees,
            input.legal_fees_purchase,
        ]
        .into_iter()
        .sum()
    }

    /// GST on the raw build cost only; contingency and site costs are outside
    /// the tax base.
    fn gst(
        &self,
        input: &FeasibilityInputs,
    ) -> Decimal {
        if input.gst_on_build {
            input.build_cost * input.gst_rate.value()
        } else {
            Decimal::ZERO
        }
    }

    fn acquisition_cost(
        &self,
        input: &FeasibilityInputs,
    ) -> Decimal {
        input.land_price + input.stamp_duty + input.legal_fees_purchase
    }

    /// Construction interest plus loan fees.
    ///
    /// The loan is drawn progressively, so the average balance over the build
    /// is taken as half the construction subtotal.
    fn finance_cost(
        &self,
        input: &FeasibilityInputs,
        subtotal_construction: Decimal,
    ) -> Decimal {
        let average_balance = subtotal_construction / Decimal::TWO;
        let monthly_rate = input.loan_interest_rate.value() / MONTHS_PER_YEAR;
        let interest = average_balance * monthly_rate * input.construction_months;

        interest + input.bank_fees + input.valuation_fees + input.mortgage_insurance
    }

    fn holding_cost(
        &self,
        input: &FeasibilityInputs,
    ) -> Decimal {
        let annual = input.council_rates
            + input.insurance
            + input.utilities_monthly * MONTHS_PER_YEAR
            + input.property_management;

        annual * input.hold_years
    }

    /// Compounds `base` at `growth` for `years`.
    ///
    /// Whole years compound exactly; fractional years use the decimal power
    /// approximation. Saturates rather than overflowing.
    fn resale_value(
        &self,
        base: Decimal,
        growth: Fraction,
        years: Decimal,
    ) -> Decimal {
        let rate = Decimal::ONE + growth.value();
        let factor = match years.to_u64() {
            Some(whole) if years.fract().is_zero() => rate.checked_powu(whole),
            _ => rate.checked_powd(years),
        };

        base.saturating_mul(factor.unwrap_or(Decimal::MAX))
    }

    fn selling_costs(
        &self,
        resale: Decimal,
        input: &FeasibilityInputs,
    ) -> Decimal {
        resale * input.agent_commission_pct.value() + input.sales_legal_fees + input.marketing_costs
    }

    /// Applies the main-residence exemption, then the CGT discount.
    ///
    /// The discount is granted for `hold_years >= 1`, a proxy for "held more
    /// than twelve months".
    fn taxable_gain(
        &self,
        raw_gain: Decimal,
        input: &FeasibilityInputs,
    ) -> Decimal {
        let gain = raw_gain * input.owner_occupied_share_pct.complement();

        if input.apply_cgt_discount && input.hold_years >= Decimal::ONE && gain > Decimal::ZERO {
            gain / Decimal::TWO
        } else {
            gain
        }
    }

    fn estimated_tax(
        &self,
        taxable_gain: Decimal,
        owner_occupied_share: Fraction,
        tax_rate: Fraction,
    ) -> Decimal {
        if owner_occupied_share.is_full() {
            Decimal::ZERO
        } else {
            taxable_gain * tax_rate.value()
        }
    }
}

impl Worksheet for FeasibilityWorksheet {
    type Input = FeasibilityInputs;
    type Output = FeasibilityOutputs;

    const NAME: &'static str = "feasibility";
    const TITLE: &'static str = "Build Feasibility";

    fn calculate(
        &self,
        input: &FeasibilityInputs,
    ) -> FeasibilityOutputs {
        self.breakdown(input).outputs
    }
}

/// Runs the feasibility worksheet.
pub fn calculate_feasibility(input: &FeasibilityInputs) -> FeasibilityOutputs {
    FeasibilityWorksheet::new().calculate(input)
}
