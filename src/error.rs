use crate::extract::ExtractError;
use thiserror::Error;

/// Unified error type for promptdoc.
///
/// Aggregates the failure modes of the collaborating layers into actionable,
/// high-level categories. The token budgeter never produces errors: counting
/// falls back to estimation and truncation is total over its inputs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Document extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Network transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
