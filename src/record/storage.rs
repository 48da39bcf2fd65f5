use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::ParsedBlog;

/// Longest sanitized locator used in a file name
const MAX_STEM_CHARS: usize = 120;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory records are written to
    pub base_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("./data"),
        }
    }
}

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not find a free file name for {0}")]
    NoFreeName(String),
}

type Result<T> = std::result::Result<T, StorageError>;

/// Replace every non-alphanumeric character with an underscore
pub fn sanitize_locator(locator: &str) -> String {
    locator
        .chars()
        .take(MAX_STEM_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// File stem for a record of `locator` written at `timestamp`
pub fn output_file_stem(locator: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}-{}",
        sanitize_locator(locator),
        timestamp.format("%Y%m%dT%H%M%S%.6fZ")
    )
}

/// Remove a file whose write failed, logging when even that fails
async fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to remove partial record {}: {}", path.display(), e);
    }
}

/// Writes each record to its own JSON file
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    config: StorageConfig,
}

impl RecordStore {
    /// Create a new store with custom configuration
    pub fn with_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Directory records are written to
    pub fn base_path(&self) -> &Path {
        &self.config.base_path
    }

    /// Create the file for `stem`, never reusing an existing name
    async fn create_unique(&self, stem: &str) -> Result<(PathBuf, fs::File)> {
        for attempt in 0..1000u32 {
            let name = if attempt == 0 {
                format!("{}.json", stem)
            } else {
                format!("{}-{}.json", stem, attempt)
            };
            let path = self.config.base_path.join(name);

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("{} already exists, trying next name", path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StorageError::NoFreeName(stem.to_string()))
    }

    /// Persist a record as pretty-printed JSON
    ///
    /// # Returns
    ///
    /// The path of the new file. A failed write leaves no file behind.
    pub async fn persist(&self, record: &ParsedBlog) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(record)?;

        fs::create_dir_all(&self.config.base_path).await?;
        let stem = output_file_stem(&record.source, Utc::now());
        let (path, mut file) = self.create_unique(&stem).await?;

        let written = async {
            file.write_all(json.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            discard_partial(&path).await;
            return Err(e.into());
        }

        info!("Saved {} to {}", record.source, path.display());
        Ok(path)
    }

    /// Read a persisted record back
    pub async fn load(&self, path: &Path) -> Result<ParsedBlog> {
        let contents = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }
}
