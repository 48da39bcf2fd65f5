//! # Loader Configuration Module
//!
//! Configuration for fetching and extracting documents. Uses a builder pattern for
//! flexible configuration.
//!
//! The default user agent is a conventional desktop browser string. Many sites answer
//! unfamiliar clients with a block page or a 403, so the loader identifies itself as
//! a browser unless told otherwise.

use std::time::Duration;

/// Browser-like identification sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the loaders
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// User agent to use for requests
    pub user_agent: String,

    /// Timeout for a single fetch in seconds
    pub timeout_secs: u64,

    /// Maximum number of redirects to follow
    pub max_redirects: usize,

    /// CSS selectors for candidate main-content containers
    pub content_selectors: Vec<String>,

    /// CSS selectors for elements to exclude
    pub exclude_selectors: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_redirects: 10,
            content_selectors: vec![
                "article".to_string(),
                "main".to_string(),
                "[role='main']".to_string(),
                ".post-content".to_string(),
                ".entry-content".to_string(),
                ".article-body".to_string(),
                "#content".to_string(),
            ],
            exclude_selectors: vec![
                "nav".to_string(),
                "header".to_string(),
                "footer".to_string(),
                "aside".to_string(),
                "form".to_string(),
                ".navigation".to_string(),
                ".menu".to_string(),
                ".sidebar".to_string(),
                ".ads".to_string(),
                ".comments".to_string(),
                "#nav".to_string(),
                "#header".to_string(),
                "#footer".to_string(),
                "#sidebar".to_string(),
                "#comments".to_string(),
            ],
        }
    }
}

/// Builder for LoaderConfig
#[derive(Debug, Default)]
pub struct LoaderConfigBuilder {
    config: LoaderConfig,
}

impl LoaderConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the fetch timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the maximum number of redirects to follow
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.config.max_redirects = max_redirects;
        self
    }

    /// Set the CSS selectors for candidate content containers
    pub fn content_selectors(mut self, content_selectors: Vec<String>) -> Self {
        self.config.content_selectors = content_selectors;
        self
    }

    /// Set the CSS selectors for elements to exclude
    pub fn exclude_selectors(mut self, exclude_selectors: Vec<String>) -> Self {
        self.config.exclude_selectors = exclude_selectors;
        self
    }

    /// Build the configuration
    pub fn build(self) -> LoaderConfig {
        self.config
    }
}

impl LoaderConfig {
    /// Create a new builder
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::new()
    }

    /// Get the fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_looks_like_a_browser() {
        let config = LoaderConfig::default();
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = LoaderConfig::builder()
            .user_agent("test-agent")
            .timeout_secs(5)
            .max_redirects(0)
            .content_selectors(vec![".body".to_string()])
            .build();

        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_redirects, 0);
        assert_eq!(config.content_selectors, vec![".body".to_string()]);
        assert!(!config.exclude_selectors.is_empty());
    }
}
