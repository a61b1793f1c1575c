//! Request handlers.
//!
//! The calculation handlers are generic over [`Worksheet`] so that every
//! worksheet gets the same JSON, CSV and PDF endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use propcalc_core::forms::inputs_from_json;
use propcalc_core::{FeasibilityInputs, RentalInputs, Worksheet};
use propcalc_data::export_csv;
use propcalc_report::{Summary, render_pdf};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::routes::AppState;

/// Inputs as understood after coercion, next to what they produced.
#[derive(Debug, Serialize)]
pub struct Calculation<I, O> {
    pub inputs: I,
    pub outputs: O,
}

/// Reads a form body. An empty body counts as an empty object.
fn read_inputs<W: Worksheet>(body: &Bytes) -> Result<W::Input, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(W::Input::default());
    }
    let value: Value = serde_json::from_slice(body)?;
    Ok(inputs_from_json(&value)?)
}

fn run<W: Worksheet>(body: &Bytes) -> Result<(W::Input, W::Output), ApiError> {
    let inputs = read_inputs::<W>(body)?;
    let outputs = W::default().calculate(&inputs);
    debug!(worksheet = W::NAME, "calculated");
    Ok((inputs, outputs))
}

pub async fn calculate_json<W: Worksheet>(
    body: Bytes,
) -> Result<Json<Calculation<W::Input, W::Output>>, ApiError> {
    let (inputs, outputs) = run::<W>(&body)?;
    Ok(Json(Calculation { inputs, outputs }))
}

pub async fn calculate_csv<W: Worksheet>(body: Bytes) -> Result<Response, ApiError> {
    let (inputs, outputs) = run::<W>(&body)?;
    let csv = export_csv(&inputs, &outputs)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.csv\"", W::NAME),
        ),
    ];
    Ok((StatusCode::OK, headers, csv).into_response())
}

pub async fn calculate_pdf<W: Summary>(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let (inputs, outputs) = run::<W>(&body)?;
    let title = state.config.pdf_title.clone();

    let pdf = tokio::task::spawn_blocking(move || render_pdf::<W>(&title, &inputs, &outputs))
        .await??;
    info!(worksheet = W::NAME, size = pdf.len(), "rendered pdf");

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.pdf\"", W::NAME),
        ),
    ];
    Ok((StatusCode::OK, headers, pdf).into_response())
}

pub async fn feasibility_defaults() -> Json<FeasibilityInputs> {
    Json(FeasibilityInputs::baseline())
}

pub async fn rental_defaults() -> Json<RentalInputs> {
    Json(RentalInputs::baseline())
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
