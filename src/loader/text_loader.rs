//! Loader for local plain-text files

use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

use crate::loader::error::LoadError;
use crate::loader::normalize::normalize_text;
use crate::loader::{ContentLoader, ContentSource, SourceType};

/// Reads a UTF-8 text file from disk
#[derive(Debug, Clone, Default)]
pub struct TextFileLoader;

impl TextFileLoader {
    /// Create a text file loader
    pub fn new() -> Self {
        Self
    }
}

impl ContentLoader for TextFileLoader {
    #[instrument(skip(self))]
    async fn load(&self, locator: &str) -> Result<ContentSource, LoadError> {
        info!("Reading {}", locator);

        let contents = fs::read_to_string(locator)
            .await
            .map_err(|e| LoadError::fetch(locator, e))?;

        let raw_text = normalize_text(&contents);
        if raw_text.is_empty() {
            return Err(LoadError::extraction(locator));
        }

        let mut raw_meta = BTreeMap::new();
        let file_name = Path::new(locator)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        if let Some(name) = &file_name {
            raw_meta.insert("file_name".to_string(), name.clone());
        }

        Ok(ContentSource {
            source_type: SourceType::Text,
            original_source: locator.to_string(),
            raw_text,
            raw_meta,
            title: None,
        })
    }
}
