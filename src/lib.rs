//! # pagelens - Structured metadata for web content
//!
//! This crate fetches documents, extracts their main readable text and asks a language
//! model to describe them as a structured JSON record.
//!
//! ## Pipeline
//!
//! - `loader`: locator → [`loader::ContentSource`] (main text plus document metadata)
//! - `analyzer`: content → [`analyzer::AIAnalysis`] via an inference backend
//! - `record`: source + analysis → [`record::ParsedBlog`], persisted as JSON
//! - `batch`: drives a list of locators through the pipeline, one at a time
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagelens::analyzer::{Analyzer, AnalyzerConfig, OllamaBackend};
//! use pagelens::loader::{ContentLoader, LoaderConfig, UrlLoader};
//! use pagelens::record::ParsedBlog;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = UrlLoader::new(LoaderConfig::default())?;
//!     let content = loader.load("https://example.com/post").await?;
//!
//!     let config = AnalyzerConfig::default();
//!     let analyzer = Analyzer::new(OllamaBackend::new(&config)?, config);
//!     let analysis = analyzer.analyze(&content).await?;
//!
//!     let record = ParsedBlog::assemble(content, analysis);
//!     println!("{}", serde_json::to_string_pretty(&record)?);
//!     Ok(())
//! }
//! ```

mod error;
mod http;

pub mod analyzer;
pub mod batch;
pub mod loader;
pub mod record;

pub use error::{Error, Result};

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::analyzer::{AIAnalysis, Analyzer, AnalyzerConfig, InferenceBackend};
    pub use crate::batch::{BatchReport, BatchRunner};
    pub use crate::error::{Error, Result};
    pub use crate::loader::{ContentLoader, ContentSource, LocatorLoader, SourceType};
    pub use crate::record::{ParsedBlog, RecordStore};
}
