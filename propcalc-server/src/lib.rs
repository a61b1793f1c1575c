//! HTTP front end for the property calculators.
//!
//! Every worksheet is exposed three ways from the same JSON body: as JSON
//! (`POST /api/<name>`), as a `section,key,value` CSV download
//! (`POST /api/<name>/csv`) and as a one-page PDF summary
//! (`POST /api/<name>/pdf`).

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::{AppState, app};
