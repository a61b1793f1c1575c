//! CSV loader for batches of worksheet scenarios.
//!
//! ## CSV Format
//!
//! The header row names input fields by their snake_case key. Column order
//! does **not** matter and any subset of fields may be given; fields that are
//! absent (or left blank) keep their zero default. Header names are
//! case-sensitive.
//!
//! An optional `scenario` column names each row. Rows without a name are
//! called `scenario-N`, where `N` is the 1-based data row number.
//!
//! Numbers are plain decimals (`800000`, `0.05`, `1.5e3`). Rates may be
//! written as fractions or whole percents, exactly as in the forms. Flags
//! accept `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`.
//!
//! ### Example
//!
//! ```csv
//! scenario,land_price,build_cost,deposit,hold_years,annual_market_growth
//! duplex,800000,750000,300000,3,5
//! townhouse,650000,900000,250000,4,0.04
//! ```

use std::path::Path;
use std::str::FromStr;

use propcalc_core::{FieldEntry, FieldKind, InputField, InputRecord};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Header of the optional name column.
pub const SCENARIO_COLUMN: &str = "scenario";

/// Errors that can occur while loading scenarios.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    /// The underlying CSV read failed (bad structure, ragged rows, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// A header named neither an input field nor the scenario column.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A cell could not be read as its field's type. `row` is 1-based
    /// (header = row 0).
    #[error("invalid value '{value}' for '{column}' on row {row}")]
    InvalidValue {
        column: String,
        value: String,
        row: usize,
    },
}

/// One named set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario<R> {
    pub name: String,
    pub inputs: R,
}

#[derive(Debug, Clone, Copy)]
enum Column<F> {
    Name,
    Field(F),
}

fn parse_number(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_cell(
    text: &str,
    kind: FieldKind,
) -> Option<FieldEntry> {
    match kind {
        FieldKind::Flag => parse_flag(text).map(FieldEntry::Flag),
        _ => parse_number(text).map(FieldEntry::Number),
    }
}

fn resolve_columns<F: InputField>(headers: &csv::StringRecord) -> Result<Vec<Column<F>>, ScenarioLoadError> {
    headers
        .iter()
        .map(|header| {
            if header == SCENARIO_COLUMN {
                Ok(Column::Name)
            } else {
                F::parse(header)
                    .map(Column::Field)
                    .ok_or_else(|| ScenarioLoadError::UnknownColumn(header.to_string()))
            }
        })
        .collect()
}

/// Convert a single CSV record into a scenario.
///
/// row_number is 1-based (for error messages and default names).
fn convert_record<R: InputRecord>(
    record: &csv::StringRecord,
    columns: &[Column<R::Field>],
    row_number: usize,
) -> Result<Scenario<R>, ScenarioLoadError> {
    let mut name = None;
    let mut inputs = R::default();

    for (column, cell) in columns.iter().zip(record.iter()) {
        match column {
            Column::Name if !cell.is_empty() => name = Some(cell.to_string()),
            Column::Name => {}
            Column::Field(_) if cell.is_empty() => {}
            Column::Field(field) => {
                let entry = parse_cell(cell, field.kind()).ok_or_else(|| {
                    ScenarioLoadError::InvalidValue {
                        column: field.as_str().to_string(),
                        value: cell.to_string(),
                        row: row_number,
                    }
                })?;
                inputs.set(*field, entry);
            }
        }
    }

    Ok(Scenario {
        name: name.unwrap_or_else(|| format!("scenario-{row_number}")),
        inputs,
    })
}

/// Parse CSV text and return its scenarios in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid.
/// * [`ScenarioLoadError::UnknownColumn`] if a header is not a field of `R`.
/// * [`ScenarioLoadError::InvalidValue`] if a cell cannot be read.
pub fn load_from_str<R: InputRecord>(input: &str) -> Result<Vec<Scenario<R>>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let columns = resolve_columns::<R::Field>(reader.headers()?)?;

    let scenarios = reader
        .records()
        .enumerate()
        .map(|(idx, result)| {
            let record = result?;
            convert_record(&record, &columns, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file<R: InputRecord>(path: &Path) -> Result<Vec<Scenario<R>>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use propcalc_core::{FeasibilityInputs, RentalInputs};
    use rust_decimal_macros::dec;

    use super::*;

    const NAMED_CSV: &str = "\
scenario,land_price,build_cost,hold_years,annual_market_growth,gst_on_build
duplex,800000,750000,3,5,yes
townhouse,650000,900000,4,0.04,0
";

    // ========================================================================
    // Successful loads
    // ========================================================================

    #[test]
    fn loads_named_rows_in_file_order() {
        let scenarios: Vec<Scenario<FeasibilityInputs>> = load_from_str(NAMED_CSV).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "duplex");
        assert_eq!(scenarios[1].name, "townhouse");
    }

    #[test]
    fn values_pass_through_field_rules() {
        let scenarios: Vec<Scenario<FeasibilityInputs>> = load_from_str(NAMED_CSV).unwrap();

        let duplex = &scenarios[0].inputs;
        assert_eq!(duplex.land_price, dec!(800000));
        assert_eq!(duplex.hold_years, dec!(3));
        assert_eq!(duplex.annual_market_growth.value(), dec!(0.05));
        assert!(duplex.gst_on_build);

        let townhouse = &scenarios[1].inputs;
        assert_eq!(townhouse.annual_market_growth.value(), dec!(0.04));
        assert!(!townhouse.gst_on_build);
    }

    #[test]
    fn unnamed_rows_are_numbered() {
        let csv = "purchase_price,rent_per_week\n900000,900\n500000,550\n";

        let scenarios: Vec<Scenario<RentalInputs>> = load_from_str(csv).unwrap();

        assert_eq!(scenarios[0].name, "scenario-1");
        assert_eq!(scenarios[1].name, "scenario-2");
        assert_eq!(scenarios[1].inputs.rent_per_week, dec!(550));
    }

    #[test]
    fn blank_cells_keep_defaults() {
        let csv = "scenario,land_price,deposit\n,800000,\n";

        let scenarios: Vec<Scenario<FeasibilityInputs>> = load_from_str(csv).unwrap();

        assert_eq!(scenarios[0].name, "scenario-1");
        assert_eq!(scenarios[0].inputs.deposit, dec!(0));
    }

    #[test]
    fn header_only_is_empty() {
        let scenarios: Vec<Scenario<FeasibilityInputs>> =
            load_from_str("land_price,build_cost\n").unwrap();

        assert!(scenarios.is_empty());
    }

    // ========================================================================
    // Errors
    // ========================================================================

    #[test]
    fn unknown_column_is_rejected() {
        let result = load_from_str::<FeasibilityInputs>("land_price,pool_cost\n1,2\n");

        match result.unwrap_err() {
            ScenarioLoadError::UnknownColumn(column) => assert_eq!(column, "pool_cost"),
            other => panic!("expected UnknownColumn, got {:?}", other),
        }
    }

    #[test]
    fn invalid_value_reports_row_and_column() {
        let csv = "\
land_price,gst_on_build
800000,yes
lots,no
";
        let result = load_from_str::<FeasibilityInputs>(csv);

        match result.unwrap_err() {
            ScenarioLoadError::InvalidValue { column, value, row } => {
                assert_eq!(column, "land_price");
                assert_eq!(value, "lots");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let result = load_from_str::<FeasibilityInputs>("gst_on_build\nmaybe\n");

        assert!(matches!(
            result,
            Err(ScenarioLoadError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let result = load_from_str::<FeasibilityInputs>("land_price,build_cost\n1\n");

        assert!(matches!(result, Err(ScenarioLoadError::Parse(_))));
    }
}
