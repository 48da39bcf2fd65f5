//! Error types for the loader module

use thiserror::Error;

/// Error type for loader operations
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource could not be retrieved
    #[error("Failed to fetch {locator}: {reason}")]
    Fetch {
        /// Locator that failed
        locator: String,
        /// Status or transport failure
        reason: String,
    },

    /// Nothing readable was left after boilerplate removal
    #[error("Could not extract main content from {locator}")]
    Extraction {
        /// Locator that failed
        locator: String,
    },
}

impl LoadError {
    /// Fetch failure for `locator`
    pub fn fetch(locator: &str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Extraction failure for `locator`
    pub fn extraction(locator: &str) -> Self {
        Self::Extraction {
            locator: locator.to_string(),
        }
    }
}
