//! Error types for the pagelens crate

use thiserror::Error;

use crate::analyzer::AnalyzeError;
use crate::batch::LocatorError;
use crate::loader::LoadError;
use crate::record::StorageError;

/// Result type for pagelens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pagelens operations
///
/// The first four variants are per-item failures: the batch logs them and moves on.
/// `Setup` is fatal to a whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// The document could not be retrieved
    #[error("Fetch error for {locator}: {reason}")]
    Fetch {
        /// Locator that failed
        locator: String,
        /// Status or transport failure
        reason: String,
    },

    /// The document was retrieved but no main content could be identified
    #[error("Extraction error for {locator}: no main content found")]
    Extraction {
        /// Locator that failed
        locator: String,
    },

    /// The inference backend call failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// The inference backend answered with text that does not fit the requested shape
    #[error("Schema parse error: {reason}\nRaw response: {raw}")]
    SchemaParse {
        /// Why the response was rejected
        reason: String,
        /// The raw completion text, kept for diagnosis
        raw: String,
    },

    /// The record could not be persisted
    #[error("Storage error: {0}")]
    Storage(String),

    /// The run cannot start at all
    #[error("Setup error: {0}")]
    Setup(String),
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Fetch { locator, reason } => Error::Fetch { locator, reason },
            LoadError::Extraction { locator } => Error::Extraction { locator },
        }
    }
}

impl From<AnalyzeError> for Error {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Inference(reason) => Error::Inference(reason),
            AnalyzeError::SchemaParse { reason, raw } => Error::SchemaParse { reason, raw },
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<LocatorError> for Error {
    fn from(err: LocatorError) -> Self {
        Error::Setup(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_conversion_keeps_locator() {
        let err: Error = LoadError::Extraction {
            locator: "https://example.com/a".to_string(),
        }
        .into();

        match err {
            Error::Extraction { locator } => assert_eq!(locator, "https://example.com/a"),
            other => panic!("Expected Extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_parse_error_shows_raw_text() {
        let err: Error = AnalyzeError::SchemaParse {
            reason: "expected value at line 1 column 1".to_string(),
            raw: "not json at all".to_string(),
        }
        .into();

        assert!(err.to_string().contains("not json at all"));
    }

    #[test]
    fn test_locator_error_is_setup() {
        let err: Error = LocatorError::Empty {
            path: "urls.txt".into(),
        }
        .into();
        assert!(matches!(err, Error::Setup(_)));
    }
}
