use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use propcalc_core::{FeasibilityWorksheet, RentalRoiWorksheet, RepaymentWorksheet};

use crate::config::ServerConfig;
use crate::handlers::{
    calculate_csv, calculate_json, calculate_pdf, feasibility_defaults, health, not_found,
    rental_defaults,
};

/// Read-only state shared by every request.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: ServerConfig,
}

/// Builds the application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/feasibility", post(calculate_json::<FeasibilityWorksheet>))
        .route("/api/feasibility/csv", post(calculate_csv::<FeasibilityWorksheet>))
        .route("/api/feasibility/pdf", post(calculate_pdf::<FeasibilityWorksheet>))
        .route("/api/feasibility/defaults", get(feasibility_defaults))
        .route("/api/rental-roi", post(calculate_json::<RentalRoiWorksheet>))
        .route("/api/rental-roi/csv", post(calculate_csv::<RentalRoiWorksheet>))
        .route("/api/rental-roi/pdf", post(calculate_pdf::<RentalRoiWorksheet>))
        .route("/api/rental-roi/defaults", get(rental_defaults))
        .route("/api/repayment", post(calculate_json::<RepaymentWorksheet>))
        .route("/api/repayment/csv", post(calculate_csv::<RepaymentWorksheet>))
        .route("/api/repayment/pdf", post(calculate_pdf::<RepaymentWorksheet>))
        .fallback(not_found)
        .with_state(state)
}
