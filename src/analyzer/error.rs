//! Error types for the analyzer module

use thiserror::Error;

/// Error type for analyzer operations
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The inference backend call failed
    #[error("Inference backend error: {0}")]
    Inference(String),

    /// The completion was not JSON of the requested shape
    #[error("AI response was not valid JSON: {reason}\nRaw response: {raw}")]
    SchemaParse {
        /// Why the completion was rejected
        reason: String,
        /// The completion text exactly as received
        raw: String,
    },
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Inference(format!("request timed out: {}", err))
        } else {
            Self::Inference(err.to_string())
        }
    }
}
