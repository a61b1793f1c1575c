//! CSV import and export for the property calculators.
//!
//! - [`export`] flattens a worksheet's inputs and outputs into
//!   `section,key,value` rows.
//! - [`scenarios`] reads a table of input scenarios, one per row, for batch
//!   runs.

pub mod export;
pub mod scenarios;

pub use export::{CsvExportError, ExportRow, ScenarioWriter, Section, export_csv, export_rows};
pub use scenarios::{Scenario, ScenarioLoadError, load_from_file, load_from_str};
