//! # Batch Orchestrator
//!
//! Drives every locator through load, analyze and persist, one at a time. A failure in
//! any stage is logged with its locator and recorded in the [`BatchReport`]; the next
//! locator is processed regardless.

mod locators;

pub use locators::{DEFAULT_LOCATOR_FILE, LocatorError, parse_locators, read_locators};

use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::analyzer::{Analyzer, InferenceBackend};
use crate::error::{Error, Result};
use crate::loader::ContentLoader;
use crate::record::{ParsedBlog, RecordStore};

/// A locator that could not be processed
#[derive(Debug)]
pub struct ItemFailure {
    /// The offending locator
    pub locator: String,

    /// What went wrong
    pub error: Error,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Locators that were persisted, with their output file
    pub succeeded: Vec<(String, PathBuf)>,

    /// Locators that failed
    pub failed: Vec<ItemFailure>,
}

impl BatchReport {
    /// Number of locators attempted
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Runs the pipeline over a list of locators
#[derive(Debug, Clone)]
pub struct BatchRunner<L, B> {
    loader: L,
    analyzer: Analyzer<B>,
    store: RecordStore,
}

impl<L, B> BatchRunner<L, B>
where
    L: ContentLoader,
    B: InferenceBackend,
{
    /// Create a runner from its three stages
    pub fn new(loader: L, analyzer: Analyzer<B>, store: RecordStore) -> Self {
        Self {
            loader,
            analyzer,
            store,
        }
    }

    /// Load, analyze and persist a single locator
    #[instrument(skip(self))]
    pub async fn process_item(&self, locator: &str) -> Result<PathBuf> {
        let content = self.loader.load(locator).await?;
        let analysis = self.analyzer.analyze(&content).await?;
        let record = ParsedBlog::assemble(content, analysis);
        Ok(self.store.persist(&record).await?)
    }

    /// Process every locator in order
    ///
    /// # Arguments
    ///
    /// * `locators` - The locators to process
    /// * `progress` - Receives each locator once it has been handled
    ///
    /// # Returns
    ///
    /// A report of successes and failures. Only an empty locator list is an error.
    pub async fn run(
        &self,
        locators: &[String],
        progress: Option<mpsc::Sender<String>>,
    ) -> Result<BatchReport> {
        if locators.is_empty() {
            return Err(Error::Setup("no locators to process".to_string()));
        }

        info!("Processing {} locators", locators.len());
        let mut report = BatchReport::default();

        for locator in locators {
            match self.process_item(locator).await {
                Ok(path) => report.succeeded.push((locator.clone(), path)),
                Err(e) => {
                    error!("Failed to process {}: {}", locator, e);
                    report.failed.push(ItemFailure {
                        locator: locator.clone(),
                        error: e,
                    });
                }
            }

            if let Some(sender) = &progress {
                if let Err(e) = sender.send(locator.clone()).await {
                    debug!("Progress receiver is gone: {}", e);
                }
            }
        }

        info!(
            "Batch finished: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }
}
