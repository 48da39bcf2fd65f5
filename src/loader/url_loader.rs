//! Loader for web pages

use reqwest::Client as ReqwestClient;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::http::{HttpOptions, build_client};
use crate::loader::content_extraction::{extract_main_content, extract_meta_tags};
use crate::loader::error::LoadError;
use crate::loader::{ContentLoader, ContentSource, LoaderConfig, SourceType};

/// Fetches a page over HTTP(S) and turns it into a [`ContentSource`]
#[derive(Debug, Clone)]
pub struct UrlLoader {
    client: ReqwestClient,
    config: LoaderConfig,
}

impl UrlLoader {
    /// Create a URL loader from the loader configuration
    pub fn new(config: LoaderConfig) -> crate::Result<Self> {
        let client = build_client(&HttpOptions {
            user_agent: Some(config.user_agent.clone()),
            timeout: config.timeout(),
            max_redirects: config.max_redirects,
        })?;
        Ok(Self { client, config })
    }

    /// Whether `locator` is an http(s) URL this loader can fetch
    pub fn accepts(locator: &str) -> bool {
        Url::parse(locator)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        let url = Url::parse(locator).map_err(|e| LoadError::fetch(locator, e))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::fetch(locator, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::fetch(locator, format!("HTTP status {}", status)));
        }

        response.text().await.map_err(|e| LoadError::fetch(locator, e))
    }

    /// Run both passes over fetched markup
    fn parse(&self, locator: &str, html: &str) -> Result<ContentSource, LoadError> {
        let raw_meta = extract_meta_tags(html);
        debug!("Collected {} meta tags from {}", raw_meta.len(), locator);

        let extracted = extract_main_content(
            html,
            &self.config.content_selectors,
            &self.config.exclude_selectors,
        );

        if extracted.text.is_empty() {
            warn!(
                "No main content in {} ({} meta tags discarded)",
                locator,
                raw_meta.len()
            );
            return Err(LoadError::extraction(locator));
        }

        Ok(ContentSource {
            source_type: SourceType::Url,
            original_source: locator.to_string(),
            raw_text: extracted.text,
            raw_meta,
            title: extracted.title,
        })
    }
}

impl ContentLoader for UrlLoader {
    #[instrument(skip(self))]
    async fn load(&self, locator: &str) -> Result<ContentSource, LoadError> {
        info!("Fetching {}", locator);

        let html = self.fetch(locator).await?;
        let source = self.parse(locator, &html)?;

        info!(
            "Loaded {} characters of text from {}",
            source.raw_text.chars().count(),
            locator
        );
        Ok(source)
    }
}
