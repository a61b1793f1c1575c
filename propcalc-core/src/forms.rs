//! Lenient coercion of form submissions into input records.
//!
//! Browser forms and hand-written JSON send whatever the user typed:
//! `"$1,200.50"`, `"6%"`, `"yes"`, or nothing at all. Everything here is
//! total. Unreadable values become zero (or `false`) and are logged, and
//! every accepted value is normalized through the record's field rules.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{FieldEntry, FieldKind, InputField, InputRecord};

/// Errors that can occur when reading a form submission.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("expected a JSON object of input fields, got {0}")]
    NotAnObject(&'static str),
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

/// Reads a number out of free text.
///
/// Every character other than digits, signs, `.` and exponent markers is
/// dropped before parsing. Text that still doesn't parse, or parses to a
/// non-finite value, reads as zero. Magnitudes beyond [`Decimal`]'s range
/// saturate.
///
/// # Examples
///
/// ```
/// use propcalc_core::forms::coerce_number;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(coerce_number("$1,200.50"), dec!(1200.50));
/// assert_eq!(coerce_number("abc"), dec!(0));
/// ```
pub fn coerce_number(text: &str) -> Decimal {
    let cleaned: String = text.chars().filter(|&c| is_numeric_char(c)).collect();
    if cleaned.is_empty() {
        if !text.trim().is_empty() {
            warn!(input = text, "no digits in numeric field, using 0");
        }
        return Decimal::ZERO;
    }

    let float = match cleaned.parse::<f64>() {
        Ok(float) if float.is_finite() => float,
        _ => {
            warn!(input = text, "unreadable number, using 0");
            return Decimal::ZERO;
        }
    };

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
        .or_else(|| Decimal::from_f64(float))
        .unwrap_or_else(|| {
            if float.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
}

/// Reads a yes/no value out of free text.
///
/// `true`, `yes`, `on` (any case) and any non-zero number are yes.
pub fn coerce_flag(text: &str) -> bool {
    let text = text.trim();
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "y" => true,
        "false" | "no" | "off" | "n" | "" => false,
        _ => !coerce_number(text).is_zero(),
    }
}

/// Interprets raw text for a field of the given kind.
///
/// Blank text yields `None` so that callers keep the field's default.
pub fn coerce_text(
    text: &str,
    kind: FieldKind,
) -> Option<FieldEntry> {
    if text.trim().is_empty() {
        return None;
    }
    let entry = match kind {
        FieldKind::Flag => FieldEntry::Flag(coerce_flag(text)),
        _ => FieldEntry::Number(coerce_number(text)),
    };
    Some(entry)
}

fn coerce_value(
    value: &Value,
    kind: FieldKind,
) -> Option<FieldEntry> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(FieldEntry::Flag(*flag)),
        Value::Number(number) => coerce_text(&number.to_string(), kind),
        Value::String(text) => coerce_text(text, kind),
        Value::Array(_) | Value::Object(_) => {
            warn!(kind = ?kind, "nested value in input field, using 0");
            Some(FieldEntry::Number(Decimal::ZERO))
        }
    }
}

/// Builds an input record from a JSON object of field values.
///
/// Missing and `null` fields keep their defaults and unknown keys are
/// ignored. Values may be numbers, booleans or strings.
///
/// ```
/// use propcalc_core::RentalInputs;
/// use propcalc_core::forms::inputs_from_json;
/// use rust_decimal_macros::dec;
/// use serde_json::json;
///
/// let inputs: RentalInputs = inputs_from_json(&json!({
///     "purchase_price": "$900,000",
///     "interest_rate": 6,
/// }))
/// .unwrap();
///
/// assert_eq!(inputs.purchase_price, dec!(900000));
/// assert_eq!(inputs.interest_rate.value(), dec!(0.06));
/// ```
pub fn inputs_from_json<R: InputRecord>(body: &Value) -> Result<R, FormError> {
    let Value::Object(fields) = body else {
        return Err(FormError::NotAnObject(json_type_name(body)));
    };

    let mut record = R::default();
    for (key, value) in fields {
        let Some(field) = R::Field::parse(key) else {
            debug!(key = %key, "ignoring unknown input field");
            continue;
        };
        if let Some(entry) = coerce_value(value, field.kind()) {
            record.set(field, entry);
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::models::{FeasibilityInputs, RepaymentInputs};

    // ========================================================================
    // coerce_number
    // ========================================================================

    #[test]
    fn strips_currency_formatting() {
        assert_eq!(coerce_number("$1,200.50"), dec!(1200.50));
        assert_eq!(coerce_number(" 800 000 "), dec!(800000));
        assert_eq!(coerce_number("-42"), dec!(-42));
    }

    #[test]
    fn unreadable_text_is_zero() {
        assert_eq!(coerce_number("abc"), dec!(0));
        assert_eq!(coerce_number("1.2.3"), dec!(0));
        assert_eq!(coerce_number(""), dec!(0));
    }

    #[test]
    fn non_finite_values_are_zero() {
        assert_eq!(coerce_number("1e400"), dec!(0));
    }

    #[test]
    fn scientific_notation_is_accepted() {
        assert_eq!(coerce_number("1.5e3"), dec!(1500));
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(coerce_number("1e30"), Decimal::MAX);
        assert_eq!(coerce_number("-1e30"), Decimal::MIN);
    }

    // ========================================================================
    // coerce_flag
    // ========================================================================

    #[test]
    fn flag_spellings() {
        for yes in ["true", "TRUE", "1", "yes", "on", "2"] {
            assert!(coerce_flag(yes), "{yes} should read as yes");
        }
        for no in ["false", "0", "no", "off", "", "nope"] {
            assert!(!coerce_flag(no), "{no} should read as no");
        }
    }

    // ========================================================================
    // inputs_from_json
    // ========================================================================

    #[test]
    fn percent_string_becomes_fraction() {
        let inputs: FeasibilityInputs = inputs_from_json(&json!({
            "contingency_pct": "5",
            "annual_market_growth": "5%",
        }))
        .unwrap();

        assert_eq!(inputs.contingency_pct.value(), dec!(0.05));
        assert_eq!(inputs.annual_market_growth.value(), dec!(0.05));
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let inputs: FeasibilityInputs = inputs_from_json(&json!({
            "land_price": 800000,
        }))
        .unwrap();

        assert_eq!(inputs.land_price, dec!(800000));
        assert_eq!(inputs.build_cost, dec!(0));
        assert!(!inputs.gst_on_build);
    }

    #[test]
    fn mixed_value_types() {
        let inputs: FeasibilityInputs = inputs_from_json(&json!({
            "gst_on_build": "yes",
            "is_owner_occupied": 1,
            "apply_cgt_discount": true,
            "hold_years": "3",
            "deposit": null,
        }))
        .unwrap();

        assert!(inputs.gst_on_build);
        assert!(inputs.is_owner_occupied);
        assert!(inputs.apply_cgt_discount);
        assert_eq!(inputs.hold_years, dec!(3));
        assert_eq!(inputs.deposit, dec!(0));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let inputs: RepaymentInputs = inputs_from_json(&json!({
            "principal": 1000,
            "colour": "blue",
        }))
        .unwrap();

        assert_eq!(inputs.principal, dec!(1000));
    }

    #[test]
    fn values_are_clamped_through_field_rules() {
        let inputs: RepaymentInputs = inputs_from_json(&json!({
            "principal": -5000,
            "term_years": 400,
        }))
        .unwrap();

        assert_eq!(inputs.principal, dec!(0));
        assert_eq!(inputs.term_years, dec!(50));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let result = inputs_from_json::<RepaymentInputs>(&json!([1, 2, 3]));

        assert!(matches!(result, Err(FormError::NotAnObject("an array"))));
    }
}
