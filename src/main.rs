//! # pagelens CLI
//!
//! Reads a list of locators, runs each one through the load → analyze → persist
//! pipeline and writes one JSON record per successful locator.
//!
//! Exit status is 1 when the locator list is missing or empty or the pipeline cannot be
//! set up, and 0 once every locator has been attempted, whatever the per-item outcome.

mod telemetry;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pagelens::analyzer::{
    Analyzer, AnalyzerConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, OllamaBackend, SchemaVersion,
};
use pagelens::batch::{BatchRunner, DEFAULT_LOCATOR_FILE, read_locators};
use pagelens::loader::{LoaderConfig, LocatorLoader};
use pagelens::record::{RecordStore, StorageConfig};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract web content and enrich it with LLM-generated metadata", long_about = None)]
struct Cli {
    /// File with one URL or file path per line ('#' starts a comment)
    #[arg(default_value = DEFAULT_LOCATOR_FILE)]
    locators: PathBuf,

    /// Directory the JSON records are written to
    #[arg(short, long, env = "PAGELENS_OUTPUT_DIR", default_value = "./data")]
    output_dir: PathBuf,

    /// Model used for analysis
    #[arg(short, long, env = "PAGELENS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Ollama server address
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_BASE_URL)]
    ollama_url: String,

    /// Maximum number of characters of page text sent to the model
    #[arg(long, default_value = "25000")]
    max_chars: usize,

    /// Response schema to request
    #[arg(long, value_enum, default_value_t = SchemaVersion::V2)]
    schema: SchemaVersion,

    /// Sampling temperature
    #[arg(long, default_value = "0.1")]
    temperature: f32,

    /// Page fetch timeout in seconds
    #[arg(long, default_value = "30")]
    fetch_timeout: u64,

    /// Model call timeout in seconds
    #[arg(long, default_value = "300")]
    inference_timeout: u64,

    /// Don't show a progress bar
    #[arg(long)]
    no_progress: bool,
}

/// `OLLAMA_HOST` is commonly given as `host:port`
fn backend_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _otel = telemetry::init_tracing_subscriber()?;

    let locators = read_locators(&cli.locators).await?;
    println!(
        "Found {} locators in {}",
        locators.len(),
        cli.locators.display()
    );

    let loader_config = LoaderConfig::builder()
        .timeout_secs(cli.fetch_timeout)
        .build();
    let loader = LocatorLoader::new(loader_config)?;

    let analyzer_config = AnalyzerConfig::builder()
        .model_name(cli.model)
        .base_url(backend_url(&cli.ollama_url))
        .max_content_chars(cli.max_chars)
        .schema_version(cli.schema)
        .temperature(cli.temperature)
        .timeout_secs(cli.inference_timeout)
        .build();
    let backend = OllamaBackend::new(&analyzer_config)?;
    let analyzer = Analyzer::new(backend, analyzer_config);

    let store = RecordStore::with_config(StorageConfig {
        base_path: cli.output_dir,
    });
    let runner = BatchRunner::new(loader, analyzer, store);

    let (progress_sender, progress_handle) = if cli.no_progress {
        (None, None)
    } else {
        let (sender, mut receiver) = mpsc::channel::<String>(16);
        let progress_bar = ProgressBar::new(locators.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("##-"),
        );
        let handle = tokio::spawn(async move {
            while let Some(locator) = receiver.recv().await {
                progress_bar.inc(1);
                progress_bar.set_message(locator);
            }
            progress_bar.finish_with_message("done");
        });
        (Some(sender), Some(handle))
    };

    let start_time = std::time::Instant::now();
    let report = runner.run(&locators, progress_sender).await?;

    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }

    println!(
        "\nProcessed {} locators in {:.2?}: {} saved, {} failed",
        report.total(),
        start_time.elapsed(),
        report.succeeded.len(),
        report.failed.len()
    );
    for (locator, path) in &report.succeeded {
        println!("  saved  {} -> {}", locator, path.display());
    }
    for failure in &report.failed {
        println!("  failed {}: {}", failure.locator, failure.error);
    }

    Ok(())
}
