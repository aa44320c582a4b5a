//! Crate-level error type for loaders and exporters

use crate::simulation::ValidationErrors;
use thiserror::Error;

/// Errors raised outside the pure projection path (file and format I/O)
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("invalid simulation limits: {field} {reason}")]
    InvalidLimits { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
