//! CSV export of a calculated worksheet.
//!
//! ## CSV Format
//!
//! ```csv
//! section,key,value
//! input,land_price,800000
//! input,contingency_pct,0.1
//! input,gst_on_build,false
//! output,total_project_cost,1724000.00
//! ```
//!
//! Every input field is written first, in the record's field order, then
//! every output field. Inputs keep their full precision; outputs are rounded
//! half-up to two decimal places.
//!
//! [`ScenarioWriter`] writes the same rows for many scenarios into one file,
//! with a leading `scenario` column.

use std::io::Write;

use propcalc_core::calculations::common::round_half_up;
use propcalc_core::{InputRecord, OutputRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while writing CSV output.
#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl<W> From<csv::IntoInnerError<W>> for CsvExportError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        CsvExportError::Io(err.into_error())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Input,
    Output,
}

/// One `section,key,value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub section: Section,
    pub key: &'static str,
    pub value: String,
}

#[derive(Serialize)]
struct ScenarioRow<'a> {
    scenario: &'a str,
    section: Section,
    key: &'a str,
    value: &'a str,
}

fn format_output(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

/// Flattens a worksheet's inputs and outputs into export rows.
pub fn export_rows<R: InputRecord, O: OutputRecord>(
    inputs: &R,
    outputs: &O,
) -> Vec<ExportRow> {
    let input_rows = inputs.entries().into_iter().map(|(key, entry)| ExportRow {
        section: Section::Input,
        key,
        value: entry.to_string(),
    });
    let output_rows = outputs.entries().into_iter().map(|(key, value)| ExportRow {
        section: Section::Output,
        key,
        value: format_output(value),
    });

    input_rows.chain(output_rows).collect()
}

/// Renders a worksheet as `section,key,value` CSV text.
///
/// # Errors
///
/// Only fails if the CSV writer itself fails, which does not happen for
/// an in-memory buffer in practice.
pub fn export_csv<R: InputRecord, O: OutputRecord>(
    inputs: &R,
    outputs: &O,
) -> Result<String, CsvExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in export_rows(inputs, outputs) {
        writer.serialize(&row)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes `scenario,section,key,value` rows for a batch of scenarios.
pub struct ScenarioWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScenarioWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Appends every row for one scenario.
    pub fn write_scenario<R: InputRecord, O: OutputRecord>(
        &mut self,
        name: &str,
        inputs: &R,
        outputs: &O,
    ) -> Result<(), CsvExportError> {
        for row in export_rows(inputs, outputs) {
            self.writer.serialize(ScenarioRow {
                scenario: name,
                section: row.section,
                key: row.key,
                value: &row.value,
            })?;
        }
        Ok(())
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn finish(self) -> Result<W, CsvExportError> {
        Ok(self.writer.into_inner()?)
    }
}
