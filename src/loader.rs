//! # Content Source Loader
//!
//! This module turns a locator (a URL or a file path) into a [`ContentSource`]: the
//! document's cleaned main text plus whatever descriptive metadata the document carried.
//! It is the first stage of the pipeline and feeds the analyzer.
//!
//! ## Key Components
//!
//! - `ContentLoader`: the loading capability, one implementation per source type
//! - `UrlLoader`: fetches a web page, strips boilerplate and collects `<meta>` tags
//! - `TextFileLoader`: reads a local plain-text file
//! - `LocatorLoader`: routes each locator to the loader that understands it
//! - `normalize_text`: the blank-line collapsing applied to every loader's output
//!
//! New source types are added by implementing `ContentLoader`; callers only ever
//! hold something that implements it.

mod config;
mod content_extraction;
mod error;
mod normalize;
mod text_loader;
mod url_loader;

pub use config::{LoaderConfig, LoaderConfigBuilder};
pub use content_extraction::{ExtractedContent, extract_main_content, extract_meta_tags};
pub use error::LoadError;
pub use normalize::normalize_text;
pub use text_loader::TextFileLoader;
pub use url_loader::UrlLoader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

/// Where a [`ContentSource`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A web page fetched over HTTP(S)
    Url,
    /// A PDF document. No loader produces this yet.
    Pdf,
    /// A local plain-text file
    Text,
}

/// The normalized output of a loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSource {
    /// Loader provenance
    pub source_type: SourceType,

    /// The locator used to fetch the document
    pub original_source: String,

    /// Cleaned main text, never empty
    pub raw_text: String,

    /// Document-level metadata (e.g. `og:title`, `description`)
    pub raw_meta: BTreeMap<String, String>,

    /// Title found by the extraction pass, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ContentSource {
    /// Best title available for the document, preferring explicit metadata over the
    /// title the extraction pass found.
    pub fn original_title(&self) -> Option<&str> {
        ["og:title", "twitter:title", "title"]
            .iter()
            .filter_map(|key| self.raw_meta.get(*key))
            .map(|value| value.trim())
            .find(|value| !value.is_empty())
            .or_else(|| self.title.as_deref())
    }
}

/// The loading capability
pub trait ContentLoader {
    /// Fetch the document behind `locator` and normalize it
    fn load(&self, locator: &str) -> impl Future<Output = Result<ContentSource, LoadError>> + Send;
}

/// Loader that picks the right source type for each locator.
///
/// `http://` and `https://` locators go to the [`UrlLoader`], everything else is
/// treated as a local text file.
#[derive(Debug, Clone)]
pub struct LocatorLoader {
    url: UrlLoader,
    text: TextFileLoader,
}

impl LocatorLoader {
    /// Create a routing loader from the loader configuration
    pub fn new(config: LoaderConfig) -> crate::Result<Self> {
        Ok(Self {
            url: UrlLoader::new(config)?,
            text: TextFileLoader::new(),
        })
    }
}

impl ContentLoader for LocatorLoader {
    async fn load(&self, locator: &str) -> Result<ContentSource, LoadError> {
        if UrlLoader::accepts(locator) {
            self.url.load(locator).await
        } else {
            self.text.load(locator).await
        }
    }
}
