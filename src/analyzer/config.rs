//! # Analyzer Configuration Module
//!
//! Configuration for the structured analyzer: which model to ask, where it lives, how
//! much text it gets and which response shape it is asked for.

use std::time::Duration;

use crate::analyzer::schema::SchemaVersion;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "ingu627/exaone4.0:1.2b";

/// Ollama endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Configuration for the analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Model identifier sent to the backend and stamped into every result
    pub model_name: String,

    /// Base URL of the inference backend
    pub base_url: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum number of characters of document text put into the prompt
    pub max_content_chars: usize,

    /// Response shape to request
    pub schema_version: SchemaVersion,

    /// Timeout for a single inference call in seconds
    pub timeout_secs: u64,

    /// Ask the backend to constrain its output to JSON
    pub json_format: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.1,
            max_content_chars: 25_000,
            schema_version: SchemaVersion::default(),
            timeout_secs: 300,
            json_format: true,
        }
    }
}

/// Builder for AnalyzerConfig
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// Set the model identifier
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.config.model_name = model_name.into();
        self
    }

    /// Set the backend base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the character budget for document text
    pub fn max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.config.max_content_chars = max_content_chars;
        self
    }

    /// Set the response schema version
    pub fn schema_version(mut self, schema_version: SchemaVersion) -> Self {
        self.config.schema_version = schema_version;
        self
    }

    /// Set the inference timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set whether JSON-constrained output is requested
    pub fn json_format(mut self, json_format: bool) -> Self {
        self.config.json_format = json_format;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl AnalyzerConfig {
    /// Create a new builder
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }

    /// Get the inference timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();

        assert_eq!(config.model_name, DEFAULT_MODEL);
        assert_eq!(config.max_content_chars, 25_000);
        assert!(config.temperature < 0.5);
        assert!(config.json_format);
        assert_eq!(config.schema_version, SchemaVersion::V2);
    }

    #[test]
    fn test_builder() {
        let config = AnalyzerConfig::builder()
            .model_name("llama3")
            .base_url("http://gpu-box:11434")
            .max_content_chars(100)
            .schema_version(SchemaVersion::V1)
            .timeout_secs(10)
            .build();

        assert_eq!(config.model_name, "llama3");
        assert_eq!(config.base_url, "http://gpu-box:11434");
        assert_eq!(config.max_content_chars, 100);
        assert_eq!(config.schema_version, SchemaVersion::V1);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
