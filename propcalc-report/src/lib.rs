//! Printable summaries of the property calculators.
//!
//! Each worksheet picks a short list of headline figures ([`Summary`]) which
//! [`render_pdf`] lays out as a one-page Typst document and compiles to PDF
//! in memory. No files are read or written.

mod pdf;
mod summary;
mod world;

use thiserror::Error;

pub use pdf::{render_pdf, render_summary_pdf};
pub use summary::{Summary, SummaryLine, format_money, format_percent};

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF export failed: {0}")]
    Export(String),
}
