//! # Result Assembler
//!
//! Combines a [`ContentSource`] with its [`AIAnalysis`] into the [`ParsedBlog`] record
//! that gets persisted, and stores those records on disk.

pub mod storage;

pub use storage::{RecordStore, StorageConfig, StorageError, output_file_stem, sanitize_locator};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyzer::AIAnalysis;
use crate::loader::ContentSource;

/// The final record for one processed locator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBlog {
    /// The locator the content was loaded from
    pub source: String,

    /// Metadata the document itself carried
    pub meta_tags: BTreeMap<String, String>,

    /// Metadata produced by the analyzer
    pub ai_metadata: AIAnalysis,
}

impl ParsedBlog {
    /// Combine loader output and analyzer output
    pub fn assemble(content: ContentSource, analysis: AIAnalysis) -> Self {
        Self {
            source: content.original_source,
            meta_tags: content.raw_meta,
            ai_metadata: analysis,
        }
    }
}
