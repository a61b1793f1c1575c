//! The calculation worksheets.
//!
//! Each worksheet is a pure function from an input record to an output
//! record. The same worksheet instance serves the in-process API, the HTTP
//! handlers and the batch CLI.

pub mod common;
pub mod feasibility;
pub mod rental;
pub mod repayment;

use serde::Serialize;

use crate::models::{InputRecord, OutputRecord};

pub use feasibility::{FeasibilityBreakdown, FeasibilityWorksheet, calculate_feasibility};
pub use rental::{RentalRoiWorksheet, calculate_rental_roi};
pub use repayment::{RepaymentWorksheet, monthly_repayment};

/// A pure calculation from an input record to an output record.
///
/// Implementations must be total: every input produces a fully populated
/// output, and identical inputs produce identical outputs.
pub trait Worksheet: Default + Send + Sync + 'static {
    type Input: InputRecord + Serialize + Send + 'static;
    type Output: OutputRecord + Serialize + Send + 'static;

    /// Short machine name, used in file names and log fields.
    const NAME: &'static str;

    /// Human-readable title for reports.
    const TITLE: &'static str;

    fn calculate(
        &self,
        input: &Self::Input,
    ) -> Self::Output;
}
