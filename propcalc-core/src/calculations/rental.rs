//! Rental ROI worksheet.
//!
//! One year of a buy-and-hold rental: income, operating costs, interest-only
//! debt service, tax and the usual yield ratios. Every ratio is guarded so a
//! zero denominator gives zero rather than an error.

use rust_decimal::Decimal;
use tracing::debug;

use super::Worksheet;
use super::common::percent_of;
use crate::models::{RentalInputs, RentalOutputs};

const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Calculator for the rental ROI worksheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalRoiWorksheet;

impl RentalRoiWorksheet {
    pub fn new() -> Self {
        Self
    }

    /// Rent over the occupied weeks of the year.
    fn gross_rental_income(
        &self,
        input: &RentalInputs,
    ) -> Decimal {
        let vacancy = input.vacancy_weeks.clamp(Decimal::ZERO, WEEKS_PER_YEAR);
        input.rent_per_week * (WEEKS_PER_YEAR - vacancy)
    }

    fn operating_expenses(
        &self,
        input: &RentalInputs,
        gross_income: Decimal,
    ) -> Decimal {
        input.maintenance
            + input.insurance
            + input.council_rates
            + input.body_corporate
            + gross_income * input.property_management_pct.value()
    }

    /// Interest-only: no principal is repaid.
    fn annual_debt_service(
        &self,
        input: &RentalInputs,
    ) -> Decimal {
        input.loan_amount * input.interest_rate.value()
    }

    /// Tax refunded (positive) or payable (negative) on the year's result.
    fn tax_effect(
        &self,
        taxable_profit: Decimal,
        input: &RentalInputs,
    ) -> Decimal {
        -taxable_profit * input.marginal_tax_rate.value()
    }

    fn total_initial_cash(
        &self,
        input: &RentalInputs,
    ) -> Decimal {
        input.purchase_price + input.stamp_duty + input.closing_costs - input.loan_amount
    }
}

impl Worksheet for RentalRoiWorksheet {
    type Input = RentalInputs;
    type Output = RentalOutputs;

    const NAME: &'static str = "rental-roi";
    const TITLE: &'static str = "Rental ROI";

    fn calculate(
        &self,
        input: &RentalInputs,
    ) -> RentalOutputs {
        let gross_rental_income = self.gross_rental_income(input);
        let operating_expenses = self.operating_expenses(input, gross_rental_income);
        let net_operating_income = gross_rental_income - operating_expenses;
        let annual_debt_service = self.annual_debt_service(input);
        let cashflow_before_tax = net_operating_income - annual_debt_service;

        // Depreciation is a paper deduction: it lowers taxable profit, not cash.
        let taxable_profit = cashflow_before_tax - input.depreciation;
        let tax_effect = self.tax_effect(taxable_profit, input);
        let cashflow_after_tax = cashflow_before_tax + tax_effect;

        let total_initial_cash = self.total_initial_cash(input);

        debug!(
            %net_operating_income,
            %cashflow_before_tax,
            %tax_effect,
            "rental roi calculated"
        );

        RentalOutputs {
            gross_rental_income,
            operating_expenses,
            net_operating_income,
            annual_debt_service,
            cashflow_before_tax,
            taxable_profit,
            tax_effect,
            cashflow_after_tax,
            total_initial_cash,
            gross_yield_pct: percent_of(gross_rental_income, input.purchase_price),
            net_yield_pct: percent_of(net_operating_income, input.purchase_price),
            cash_on_cash_pct: percent_of(cashflow_before_tax, total_initial_cash),
        }
    }
}

/// Runs the rental ROI worksheet.
pub fn calculate_rental_roi(input: &RentalInputs) -> RentalOutputs {
    RentalRoiWorksheet::new().calculate(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_half_up;
    use crate::models::{Fraction, RentalField};

    fn rental_input() -> RentalInputs {
        RentalInputs::builder()
            .set(RentalField::PurchasePrice, dec!(900000))
            .set(RentalField::RentPerWeek, dec!(900))
            .set(RentalField::VacancyWeeks, dec!(2))
            .set(RentalField::PropertyManagementPct, dec!(0.06))
            .build()
    }

    // =========================================================================
    // income and expenses
    // =========================================================================

    #[test]
    fn gross_income_excludes_vacant_weeks() {
        let outputs = calculate_rental_roi(&rental_input());

        assert_eq!(outputs.gross_rental_income, dec!(45000));
        assert_eq!(outputs.gross_yield_pct, dec!(5.0));
    }

    #[test]
    fn vacancy_beyond_a_year_gives_no_income() {
        let mut input = rental_input();
        input.vacancy_weeks = dec!(70);

        assert_eq!(calculate_rental_roi(&input).gross_rental_income, dec!(0));
    }

    #[test]
    fn operating_expenses_include_management_on_gross() {
        let mut input = rental_input();
        input.maintenance = dec!(2000);
        input.insurance = dec!(1500);
        input.council_rates = dec!(2200);
        input.body_corporate = dec!(3000);

        let outputs = calculate_rental_roi(&input);

        // 8700 + 45000 × 0.06
        assert_eq!(outputs.operating_expenses, dec!(11400));
        assert_eq!(outputs.net_operating_income, dec!(33600));
        assert_eq!(round_half_up(outputs.net_yield_pct), dec!(3.73));
    }

    // =========================================================================
    // debt and tax
    // =========================================================================

    #[test]
    fn debt_service_is_interest_only() {
        let mut input = rental_input();
        input.loan_amount = dec!(700000);
        input.interest_rate = Fraction::from_entry(dec!(6));

        let outputs = calculate_rental_roi(&input);

        assert_eq!(outputs.annual_debt_service, dec!(42000));
        // 45000 - 2700 - 42000
        assert_eq!(outputs.cashflow_before_tax, dec!(300));
    }

    #[test]
    fn negative_gearing_produces_a_tax_benefit() {
        let mut input = rental_input();
        input.loan_amount = dec!(800000);
        input.interest_rate = Fraction::from_entry(dec!(0.065));
        input.depreciation = dec!(10000);
        input.marginal_tax_rate = Fraction::from_entry(dec!(37));

        let outputs = calculate_rental_roi(&input);

        // 42300 NOI - 52000 interest - 10000 depreciation
        assert_eq!(outputs.taxable_profit, dec!(-19700));
        assert_eq!(outputs.tax_effect, dec!(7289));
        assert!(outputs.tax_effect > dec!(0));
        assert_eq!(outputs.cashflow_before_tax, dec!(-9700));
        assert_eq!(outputs.cashflow_after_tax, dec!(-2411));
    }

    #[test]
    fn positive_profit_costs_tax() {
        let mut input = rental_input();
        input.marginal_tax_rate = Fraction::from_entry(dec!(0.30));

        let outputs = calculate_rental_roi(&input);

        // 42300 × 0.30 payable
        assert_eq!(outputs.tax_effect, dec!(-12690));
        assert_eq!(outputs.cashflow_after_tax, dec!(29610));
    }

    #[test]
    fn depreciation_does_not_touch_cashflow_before_tax() {
        let mut input = rental_input();
        let before = calculate_rental_roi(&input);
        input.depreciation = dec!(5000);
        let after = calculate_rental_roi(&input);

        assert_eq!(before.cashflow_before_tax, after.cashflow_before_tax);
        assert_eq!(after.taxable_profit, before.taxable_profit - dec!(5000));
    }

    // =========================================================================
    // initial cash and ratios
    // =========================================================================

    #[test]
    fn cash_on_cash_uses_cash_not_covered_by_the_loan() {
        let mut input = rental_input();
        input.stamp_duty = dec!(35000);
        input.closing_costs = dec!(5000);
        input.loan_amount = dec!(740000);
        input.interest_rate = Fraction::from_entry(dec!(0.05));

        let outputs = calculate_rental_roi(&input);

        assert_eq!(outputs.total_initial_cash, dec!(200000));
        // 42300 - 37000
        assert_eq!(outputs.cashflow_before_tax, dec!(5300));
        assert_eq!(outputs.cash_on_cash_pct, dec!(2.65));
    }

    #[test]
    fn fully_financed_purchase_has_zero_cash_on_cash() {
        let mut input = rental_input();
        input.loan_amount = dec!(950000);

        let outputs = calculate_rental_roi(&input);

        assert!(outputs.total_initial_cash < dec!(0));
        assert_eq!(outputs.cash_on_cash_pct, dec!(0));
    }

    #[test]
    fn zero_purchase_price_yields_zero_not_infinity() {
        let mut input = rental_input();
        input.purchase_price = dec!(0);

        let outputs = calculate_rental_roi(&input);

        assert_eq!(outputs.gross_yield_pct, dec!(0));
        assert_eq!(outputs.net_yield_pct, dec!(0));
    }

    #[test]
    fn calculation_is_repeatable() {
        let input = RentalInputs::baseline();

        assert_eq!(calculate_rental_roi(&input), calculate_rental_roi(&input));
    }
}
