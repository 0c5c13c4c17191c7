//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by the enrichment run.
///
/// External geocode / nearby-search failures are not represented here: the
/// providers swallow them and hand back empty data instead.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("GOOGLE_MAPS_API_KEY is not set. Export it or pass --api-key")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
