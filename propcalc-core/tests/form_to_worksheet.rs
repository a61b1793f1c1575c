//! End-to-end checks from a raw form body to worksheet outputs.

use pretty_assertions::assert_eq;
use propcalc_core::calculations::common::round_half_up;
use propcalc_core::forms::inputs_from_json;
use propcalc_core::{
    FeasibilityInputs, MAX_AMOUNT, RentalInputs, RepaymentInputs, RepaymentWorksheet, Worksheet,
    calculate_feasibility, calculate_rental_roi, normalize_fraction,
};
use rust_decimal_macros::dec;
use serde_json::json;

#[test]
fn baseline_form_matches_the_preset() {
    let form = json!({
        "land_price": "$800,000",
        "stamp_duty": 44000,
        "build_cost": "750000",
        "demolition": 20000,
        "driveway_landscaping": 20000,
        "variations_allowance": 10000,
        "contingency_pct": "10%",
        "deposit": 300000,
        "hold_years": 3,
        "annual_market_growth": 5,
        "agent_commission_pct": 0.02,
        "is_owner_occupied": "on",
        "owner_occupied_share_pct": 100,
        "apply_cgt_discount": true,
        "taxable_profit_rate": "25",
    });

    let inputs: FeasibilityInputs = inputs_from_json(&form).unwrap();

    assert_eq!(inputs, FeasibilityInputs::baseline());
}

#[test]
fn baseline_feasibility() {
    let outputs = calculate_feasibility(&FeasibilityInputs::baseline());

    assert_eq!(outputs.subtotal_construction, dec!(880000));
    assert_eq!(outputs.resale_after_hold_years, dec!(1944810));
    assert_eq!(outputs.estimated_tax, dec!(0));
    assert_eq!(round_half_up(outputs.roi_percent), dec!(60.64));
}

#[test]
fn owner_occupied_share_exempts_everything() {
    let mut inputs = FeasibilityInputs::baseline();
    inputs.is_owner_occupied = false;

    let outputs = calculate_feasibility(&inputs);

    assert_eq!(outputs.estimated_tax, dec!(0));
}

#[test]
fn zero_deposit_gives_zero_roi() {
    let inputs: FeasibilityInputs = inputs_from_json(&json!({
        "land_price": 500000,
        "build_cost": 400000,
        "hold_years": 2,
        "annual_market_growth": 8,
    }))
    .unwrap();

    let outputs = calculate_feasibility(&inputs);

    assert_eq!(outputs.roi_percent, dec!(0));
}

#[test]
fn rental_baseline_yields() {
    let outputs = calculate_rental_roi(&RentalInputs::baseline());

    assert_eq!(outputs.gross_rental_income, dec!(45000));
    assert_eq!(outputs.gross_yield_pct, dec!(5));
}

#[test]
fn empty_rental_form_is_all_zero() {
    let inputs: RentalInputs = inputs_from_json(&json!({})).unwrap();

    let outputs = calculate_rental_roi(&inputs);

    assert_eq!(outputs.gross_yield_pct, dec!(0));
    assert_eq!(outputs.net_yield_pct, dec!(0));
    assert_eq!(outputs.cash_on_cash_pct, dec!(0));
}

#[test]
fn repayment_from_form() {
    let inputs: RepaymentInputs = inputs_from_json(&json!({
        "principal": "500,000",
        "annual_rate": "6",
        "term_years": 30,
    }))
    .unwrap();

    let outputs = RepaymentWorksheet.calculate(&inputs);

    assert_eq!(round_half_up(outputs.monthly_repayment), dec!(2997.75));
}

#[test]
fn deserialized_inputs_are_clamped() {
    let inputs: FeasibilityInputs =
        serde_json::from_str(r#"{"land_price":7e28,"build_cost":7e28,"hold_years":500}"#).unwrap();

    assert_eq!(inputs.land_price, MAX_AMOUNT);
    assert_eq!(inputs.build_cost, MAX_AMOUNT);
    assert_eq!(inputs.hold_years, dec!(50));

    let outputs = calculate_feasibility(&inputs);
    assert!(outputs.total_project_cost > dec!(0));
}

#[test]
fn deserialized_rental_inputs_are_clamped() {
    let inputs: RentalInputs =
        serde_json::from_str(r#"{"purchase_price":7e28,"stamp_duty":7e28}"#).unwrap();

    assert_eq!(inputs.purchase_price, MAX_AMOUNT);

    let outputs = calculate_rental_roi(&inputs);
    assert_eq!(outputs.gross_yield_pct, dec!(0));
}

#[test]
fn deserializing_matches_form_coercion() {
    let body = r#"{"principal":"$500,000","annual_rate":"6","term_years":30,"extra":1}"#;

    let deserialized: RepaymentInputs = serde_json::from_str(body).unwrap();
    let from_form: RepaymentInputs =
        inputs_from_json(&serde_json::from_str(body).unwrap()).unwrap();

    assert_eq!(deserialized, from_form);
    assert_eq!(deserialized.annual_rate.value(), dec!(0.06));
}

#[test]
fn deserializing_a_non_object_fails() {
    let result = serde_json::from_str::<RentalInputs>("[1, 2]");

    assert!(result.is_err());
}

#[test]
fn normalization_is_idempotent_for_percents() {
    for raw in [dec!(0), dec!(0.05), dec!(1), dec!(5), dec!(37.5), dec!(100)] {
        let once = normalize_fraction(raw);
        assert_eq!(normalize_fraction(once), once, "raw value {raw}");
    }
}
