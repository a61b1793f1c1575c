//! Property investment calculators.
//!
//! Two pure worksheets sit at the centre of this crate:
//!
//! - [`FeasibilityWorksheet`] prices a knockdown-rebuild or land development
//!   held for a number of years and sold, down to an after-tax ROI on the
//!   deposit.
//! - [`RentalRoiWorksheet`] measures one year of a buy-and-hold rental:
//!   yields, cashflow before and after tax, and cash-on-cash return.
//!
//! [`RepaymentWorksheet`] adds a principal-and-interest repayment figure for
//! loan comparisons.
//!
//! Inputs are built from defaults plus whatever the caller supplies, either
//! through [`InputsBuilder`] or the lenient form coercion in [`forms`].
//! Rates are normalized to [`Fraction`]s at that boundary, so the worksheets
//! never have to guess whether `5` meant 5% or 500%.

pub mod calculations;
pub mod forms;
pub mod models;

pub use calculations::{
    FeasibilityBreakdown, FeasibilityWorksheet, RentalRoiWorksheet, RepaymentWorksheet,
    Worksheet, calculate_feasibility, calculate_rental_roi, monthly_repayment,
};
pub use models::*;
