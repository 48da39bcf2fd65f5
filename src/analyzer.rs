//! # Structured Analyzer
//!
//! This module asks a language model to describe a [`ContentSource`] as a JSON object
//! and turns the answer into an [`AIAnalysis`]. It is the second stage of the pipeline.
//!
//! ## Key Components
//!
//! - `Analyzer`: builds the prompt, calls the backend, validates and stamps the result
//! - `InferenceBackend`: the model seam, implemented by `OllamaBackend` and `MockBackend`
//! - `SchemaVersion`: the versioned response shape and its per-field hints
//! - `AIAnalysis`: an open record with typed accessors for the known fields
//!
//! Parsing is all-or-nothing: either the completion is a JSON object of the requested
//! shape, or the item fails with the raw completion attached. There are no retries.

mod backend;
mod config;
mod error;
pub mod mock_backend;
mod ollama;
mod prompt;
mod schema;

pub use backend::{InferenceBackend, InferenceRequest};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::AnalyzeError;
pub use mock_backend::MockBackend;
pub use ollama::OllamaBackend;
pub use prompt::{build_prompt, truncate_chars};
pub use schema::{FieldKind, FieldSpec, SchemaVersion, Sentiment};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument, warn};

use crate::loader::ContentSource;

/// Key under which the producing model is recorded
pub const MODEL_NAME_KEY: &str = "analyzerModelName";

/// Metadata produced by the analyzer.
///
/// The field set depends on the schema version that produced it, so the record keeps
/// every field the model returned and exposes the known ones through accessors that
/// return `None` when a field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIAnalysis {
    #[serde(rename = "analyzerModelName")]
    analyzer_model_name: String,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl AIAnalysis {
    /// Create a record produced by `analyzer_model_name`.
    ///
    /// Any `analyzerModelName` entry in `fields` is discarded.
    pub fn new(analyzer_model_name: impl Into<String>, mut fields: Map<String, Value>) -> Self {
        fields.remove(MODEL_NAME_KEY);
        Self {
            analyzer_model_name: analyzer_model_name.into(),
            fields,
        }
    }

    /// The model that produced this record
    pub fn analyzer_model_name(&self) -> &str {
        &self.analyzer_model_name
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn text_list(&self, key: &str) -> Option<Vec<&str>> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    /// Title suggested by the model
    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    /// Two or three sentence summary
    pub fn short_summary(&self) -> Option<&str> {
        self.text("shortSummary")
    }

    /// Broad category such as Tech or Finance
    pub fn category(&self) -> Option<&str> {
        self.text("category")
    }

    /// Reading level, e.g. `College`. Schema v2 only.
    pub fn reading_level(&self) -> Option<&str> {
        self.text("readingLevel")
    }

    /// Clickbait score as emitted. Meant to be 1-10 but not clamped.
    pub fn clickbait_score(&self) -> Option<f64> {
        self.fields.get("clickbaitScore").and_then(Value::as_f64)
    }

    /// Overall tone. Schema v2 only.
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.text("sentiment").and_then(|s| s.parse().ok())
    }

    /// Intended readers
    pub fn target_audience(&self) -> Option<Vec<&str>> {
        self.text_list("targetAudience")
    }

    /// Libraries, companies or people mentioned
    pub fn key_entities(&self) -> Option<Vec<&str>> {
        self.text_list("keyEntities")
    }

    /// Key takeaways. Schema v2 only.
    pub fn tldr(&self) -> Option<Vec<&str>> {
        self.text_list("tldr")
    }

    /// Topics covered, most prominent first. Schema v2 only.
    pub fn topics(&self) -> Option<Vec<&str>> {
        self.text_list("topics")
    }
}

/// Turns content into structured metadata using an inference backend
#[derive(Debug, Clone)]
pub struct Analyzer<B> {
    backend: B,
    config: AnalyzerConfig,
}

impl<B: InferenceBackend> Analyzer<B> {
    /// Create an analyzer over `backend`
    pub fn new(backend: B, config: AnalyzerConfig) -> Self {
        Self { backend, config }
    }

    /// The model identifier stamped into every result
    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }

    /// The analyzer configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Build the request sent to the backend for `content`
    pub fn build_request(&self, content: &ContentSource) -> InferenceRequest {
        let text = truncate_chars(&content.raw_text, self.config.max_content_chars);
        if text.len() < content.raw_text.len() {
            debug!(
                "Truncated text to {} characters",
                self.config.max_content_chars
            );
        }

        InferenceRequest {
            model: self.config.model_name.clone(),
            prompt: build_prompt(self.config.schema_version, content.original_title(), text),
            temperature: self.config.temperature,
            json_format: self.config.json_format,
        }
    }

    /// Analyze a loaded document
    ///
    /// # Returns
    ///
    /// The validated analysis, stamped with the configured model name
    #[instrument(skip(self, content), fields(source = %content.original_source))]
    pub async fn analyze(&self, content: &ContentSource) -> Result<AIAnalysis, AnalyzeError> {
        info!("Sending content to {}", self.config.model_name);

        let request = self.build_request(content);
        let raw = self.backend.complete(request).await?;

        self.parse_response(raw)
    }

    /// Validate a completion and stamp it with the configured model name
    pub fn parse_response(&self, raw: String) -> Result<AIAnalysis, AnalyzeError> {
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse model JSON: {}", raw);
                return Err(AnalyzeError::SchemaParse {
                    reason: e.to_string(),
                    raw,
                });
            }
        };

        let fields = match self.config.schema_version.validate(value) {
            Ok(fields) => fields,
            Err(reason) => {
                error!("Model JSON does not match the schema: {}", raw);
                return Err(AnalyzeError::SchemaParse { reason, raw });
            }
        };

        let analysis = AIAnalysis::new(self.config.model_name.clone(), fields);

        if let Some(score) = analysis.clickbait_score() {
            if !(1.0..=10.0).contains(&score) {
                warn!("clickbaitScore {} is outside 1-10, keeping it as emitted", score);
            }
        }

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SourceType;
    use serde_json::json;
    use std::collections::BTreeMap;

    const GOOD_RESPONSE: &str = r#"{
        "title": "Understanding Ownership",
        "shortSummary": "A look at Rust ownership.",
        "category": "Tech",
        "clickbaitScore": 2,
        "targetAudience": ["Rust beginners"],
        "keyEntities": ["Rust", "Ferris"],
        "sentiment": "Positive",
        "readingLevel": "College",
        "tldr": ["Values have owners", "Owners drop values"],
        "topics": ["ownership", "memory"]
    }"#;

    const MINIMAL_RESPONSE: &str = r#"{
        "title": "T",
        "shortSummary": "S",
        "category": "Tech",
        "clickbaitScore": 5,
        "targetAudience": [],
        "keyEntities": []
    }"#;

    fn content(text: &str, meta: &[(&str, &str)]) -> ContentSource {
        ContentSource {
            source_type: SourceType::Url,
            original_source: "https://example.com/a".to_string(),
            raw_text: text.to_string(),
            raw_meta: meta
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            title: None,
        }
    }

    fn analyzer(backend: MockBackend) -> Analyzer<MockBackend> {
        let config = AnalyzerConfig::builder().model_name("configured-model").build();
        Analyzer::new(backend, config)
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let backend = MockBackend::new();
        backend.set_text_response(GOOD_RESPONSE).await;

        let analysis = analyzer(backend)
            .analyze(&content("Body", &[]))
            .await
            .unwrap();

        assert_eq!(analysis.analyzer_model_name(), "configured-model");
        assert_eq!(analysis.title(), Some("Understanding Ownership"));
        assert_eq!(analysis.short_summary(), Some("A look at Rust ownership."));
        assert_eq!(analysis.category(), Some("Tech"));
        assert_eq!(analysis.clickbait_score(), Some(2.0));
        assert_eq!(analysis.sentiment(), Some(Sentiment::Positive));
        assert_eq!(analysis.reading_level(), Some("College"));
        assert_eq!(analysis.target_audience(), Some(vec!["Rust beginners"]));
        assert_eq!(analysis.key_entities(), Some(vec!["Rust", "Ferris"]));
        assert_eq!(
            analysis.tldr(),
            Some(vec!["Values have owners", "Owners drop values"])
        );
        assert_eq!(analysis.topics(), Some(vec!["ownership", "memory"]));
    }

    #[tokio::test]
    async fn test_model_name_never_taken_from_response() {
        let backend = MockBackend::new();
        backend
            .set_text_response(
                r#"{"title": "T", "shortSummary": "S", "category": "Tech", "clickbaitScore": 1,
                    "targetAudience": [], "keyEntities": [], "analyzerModelName": "hallucinated"}"#,
            )
            .await;

        let analysis = analyzer(backend)
            .analyze(&content("Body", &[]))
            .await
            .unwrap();

        assert_eq!(analysis.analyzer_model_name(), "configured-model");
        assert!(analysis.get(MODEL_NAME_KEY).is_none());

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json[MODEL_NAME_KEY], "configured-model");
    }

    #[tokio::test]
    async fn test_invalid_json_is_schema_parse_error() {
        let backend = MockBackend::new();
        backend
            .set_text_response("Sure! Here is the metadata: {title: oops")
            .await;

        let result = analyzer(backend).analyze(&content("Body", &[])).await;

        match result {
            Err(AnalyzeError::SchemaParse { raw, .. }) => {
                assert_eq!(raw, "Sure! Here is the metadata: {title: oops");
            }
            other => panic!("Expected SchemaParse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_shape_is_schema_parse_error() {
        let backend = MockBackend::new();
        let reply = MINIMAL_RESPONSE.replace(r#""keyEntities": []"#, r#""keyEntities": "Rust""#);
        backend.set_text_response(&reply).await;

        let result = analyzer(backend).analyze(&content("Body", &[])).await;

        match result {
            Err(AnalyzeError::SchemaParse { reason, raw }) => {
                assert!(reason.contains("keyEntities"));
                assert_eq!(raw, reply);
                assert!(!raw.contains("configured-model"));
            }
            other => panic!("Expected SchemaParse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_object_is_schema_parse_error() {
        let backend = MockBackend::new();
        backend.set_text_response("{}").await;

        let result = analyzer(backend).analyze(&content("Body", &[])).await;

        match result {
            Err(AnalyzeError::SchemaParse { reason, raw }) => {
                assert!(reason.contains("missing required field"));
                assert_eq!(raw, "{}");
            }
            other => panic!("Expected SchemaParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unrelated_object_is_rejected() {
        let analyzer = analyzer(MockBackend::new());
        let result = analyzer.parse_response(r#"{"foo": 1}"#.to_string());
        assert!(matches!(result, Err(AnalyzeError::SchemaParse { .. })));
    }

    #[tokio::test]
    async fn test_backend_failure_is_inference_error() {
        let backend = MockBackend::new();
        backend.set_error("connection refused").await;

        let result = analyzer(backend).analyze(&content("Body", &[])).await;
        assert!(matches!(result, Err(AnalyzeError::Inference(_))));
    }

    #[tokio::test]
    async fn test_no_retry_on_failure() {
        let backend = MockBackend::new();
        backend.push_text_response("not json").await;
        backend.set_text_response(GOOD_RESPONSE).await;

        let analyzer = analyzer(backend.clone());
        assert!(analyzer.analyze(&content("Body", &[])).await.is_err());
        assert_eq!(backend.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_config_and_title() {
        let backend = MockBackend::new();
        backend.set_text_response(MINIMAL_RESPONSE).await;

        let config = AnalyzerConfig::builder()
            .model_name("configured-model")
            .max_content_chars(5)
            .temperature(0.2)
            .build();
        let analyzer = Analyzer::new(backend.clone(), config);

        analyzer
            .analyze(&content("0123456789", &[("og:title", "Shocking!")]))
            .await
            .unwrap();

        let requests = backend.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "configured-model");
        assert_eq!(request.temperature, 0.2);
        assert!(request.json_format);
        assert!(request.prompt.contains("ORIGINAL TITLE: Shocking!"));
        assert!(request.prompt.ends_with("TEXT CONTENT:\n01234"));
    }

    #[test]
    fn test_text_under_budget_passes_through() {
        let analyzer = analyzer(MockBackend::new());
        let request = analyzer.build_request(&content("short text", &[]));
        assert!(request.prompt.ends_with("TEXT CONTENT:\nshort text"));
    }

    #[test]
    fn test_out_of_range_score_is_kept() {
        let analyzer = analyzer(MockBackend::new());
        let reply = MINIMAL_RESPONSE.replace(r#""clickbaitScore": 5"#, r#""clickbaitScore": 11.5"#);
        let analysis = analyzer.parse_response(reply).unwrap();
        assert_eq!(analysis.clickbait_score(), Some(11.5));
    }

    #[test]
    fn test_older_schema_records_have_no_v2_fields() {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("T"));
        let analysis = AIAnalysis::new("m", fields);

        assert_eq!(analysis.sentiment(), None);
        assert_eq!(analysis.tldr(), None);
        assert_eq!(analysis.topics(), None);
    }

    #[test]
    fn test_serializes_flat() {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!("T"));
        fields.insert("topics".to_string(), json!(["a"]));
        let analysis = AIAnalysis::new("m", fields);

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(
            value,
            json!({"analyzerModelName": "m", "title": "T", "topics": ["a"]})
        );

        let back: AIAnalysis = serde_json::from_value(value).unwrap();
        assert_eq!(back, analysis);
    }
}
