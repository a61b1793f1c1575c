//! Headline figures chosen for each worksheet's printable summary.

use propcalc_core::calculations::common::round_half_up;
use propcalc_core::{
    FeasibilityInputs, FeasibilityOutputs, FeasibilityWorksheet, Fraction, RentalInputs,
    RentalOutputs, RentalRoiWorksheet, RepaymentInputs, RepaymentOutputs, RepaymentWorksheet,
    Worksheet,
};
use rust_decimal::Decimal;

/// One labelled, already formatted figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    fn money(
        label: &'static str,
        value: Decimal,
    ) -> Self {
        Self {
            label,
            value: format_money(value),
        }
    }

    fn percent(
        label: &'static str,
        value: Decimal,
    ) -> Self {
        Self {
            label,
            value: format_percent(value),
        }
    }

    fn rate(
        label: &'static str,
        value: Fraction,
    ) -> Self {
        Self::percent(label, value.as_percent())
    }

    fn count(
        label: &'static str,
        value: Decimal,
    ) -> Self {
        Self {
            label,
            value: value.normalize().to_string(),
        }
    }
}

/// A worksheet that can summarise one calculation in a few lines.
pub trait Summary: Worksheet {
    fn summary(
        input: &Self::Input,
        output: &Self::Output,
    ) -> Vec<SummaryLine>;
}

/// Formats a currency amount as `$1,234,567.89`, rounded half-up to cents.
///
/// ```
/// use propcalc_report::format_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_money(dec!(1724000)), "$1,724,000.00");
/// assert_eq!(format_money(dec!(-2411.005)), "-$2,411.01");
/// ```
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a value already in percent units, e.g. `16.34%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}

impl Summary for FeasibilityWorksheet {
    fn summary(
        input: &FeasibilityInputs,
        output: &FeasibilityOutputs,
    ) -> Vec<SummaryLine> {
        vec![
            SummaryLine::money("Land price", input.land_price),
            SummaryLine::money("Build cost", input.build_cost),
            SummaryLine::money("Deposit", input.deposit),
            SummaryLine::count("Hold period (years)", input.hold_years),
            SummaryLine::money("Total project cost", output.total_project_cost),
            SummaryLine::money("Resale value", output.resale_after_hold_years),
            SummaryLine::money("Estimated tax", output.estimated_tax),
            SummaryLine::money("Net profit after tax", output.net_profit_after_tax),
            SummaryLine::percent("ROI on deposit", output.roi_percent),
        ]
    }
}

impl Summary for RentalRoiWorksheet {
    fn summary(
        input: &RentalInputs,
        output: &RentalOutputs,
    ) -> Vec<SummaryLine> {
        vec![
            SummaryLine::money("Purchase price", input.purchase_price),
            SummaryLine::money("Rent per week", input.rent_per_week),
            SummaryLine::money("Loan amount", input.loan_amount),
            SummaryLine::rate("Interest rate", input.interest_rate),
            SummaryLine::money("Gross rental income", output.gross_rental_income),
            SummaryLine::money("Net operating income", output.net_operating_income),
            SummaryLine::money("Cashflow before tax", output.cashflow_before_tax),
            SummaryLine::money("Tax effect", output.tax_effect),
            SummaryLine::money("Cashflow after tax", output.cashflow_after_tax),
            SummaryLine::percent("Gross yield", output.gross_yield_pct),
            SummaryLine::percent("Net yield", output.net_yield_pct),
            SummaryLine::percent("Cash-on-cash return", output.cash_on_cash_pct),
        ]
    }
}

impl Summary for RepaymentWorksheet {
    fn summary(
        input: &RepaymentInputs,
        output: &RepaymentOutputs,
    ) -> Vec<SummaryLine> {
        vec![
            SummaryLine::money("Principal", input.principal),
            SummaryLine::rate("Interest rate", input.annual_rate),
            SummaryLine::count("Term (years)", input.term_years),
            SummaryLine::money("Monthly repayment", output.monthly_repayment),
            SummaryLine::money("Total repaid", output.total_repaid),
            SummaryLine::money("Total interest", output.total_interest),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use propcalc_core::calculate_feasibility;
    use rust_decimal_macros::dec;

    use super::*;

    // ========================================================================
    // Formatting
    // ========================================================================

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(999.999)), "$1,000.00");
        assert_eq!(format_money(dec!(123456.7)), "$123,456.70");
        assert_eq!(format_money(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn percent_has_two_places() {
        assert_eq!(format_percent(dec!(16.3378)), "16.34%");
        assert_eq!(format_percent(dec!(5)), "5.00%");
    }

    // ========================================================================
    // Line selection
    // ========================================================================

    #[test]
    fn feasibility_summary_lines() {
        let input = FeasibilityInputs::baseline();
        let output = calculate_feasibility(&input);

        let lines = FeasibilityWorksheet::summary(&input, &output);
        let labels: Vec<&str> = lines.iter().map(|line| line.label).collect();

        assert_eq!(
            labels,
            vec![
                "Land price",
                "Build cost",
                "Deposit",
                "Hold period (years)",
                "Total project cost",
                "Resale value",
                "Estimated tax",
                "Net profit after tax",
                "ROI on deposit",
            ]
        );
        assert_eq!(lines[3].value, "3");
        assert_eq!(lines[5].value, "$1,944,810.00");
        assert_eq!(lines[8].value, "60.64%");
    }

    #[test]
    fn repayment_summary_shows_rate_as_percent() {
        let input = RepaymentInputs::baseline();
        let output = RepaymentWorksheet.calculate(&input);

        let lines = RepaymentWorksheet::summary(&input, &output);

        assert_eq!(lines[1].value, "6.00%");
        assert_eq!(lines[3].value, "$4,316.76");
    }
}
