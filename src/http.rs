//! HTTP client construction shared by the page loader and the inference backend

use crate::error::{Error, Result};
use reqwest::Client as ReqwestClient;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

/// Options for building an HTTP client
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// User agent header, reqwest's default when `None`
    pub user_agent: Option<String>,

    /// Timeout for a whole request
    pub timeout: Duration,

    /// Maximum number of redirects to follow
    pub max_redirects: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: Duration::from_secs(120),
            max_redirects: 10,
        }
    }
}

/// Build a reqwest client from the given options
pub fn build_client(options: &HttpOptions) -> Result<ReqwestClient> {
    debug!("Building HTTP client: {:?}", options);

    let mut builder = ReqwestClient::builder()
        .timeout(options.timeout)
        .redirect(Policy::limited(options.max_redirects));

    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }

    builder
        .build()
        .map_err(|e| Error::Setup(format!("Failed to create HTTP client: {}", e)))
}
