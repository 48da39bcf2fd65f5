//! The inference backend seam

use serde::Serialize;
use std::future::Future;

use crate::analyzer::error::AnalyzeError;

/// A single-prompt completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    /// Backend model identifier
    pub model: String,

    /// The user prompt
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Ask for JSON-constrained output
    pub json_format: bool,
}

/// A language model that turns one prompt into one text completion
pub trait InferenceBackend {
    /// Run the request and return the completion text
    fn complete(
        &self,
        request: InferenceRequest,
    ) -> impl Future<Output = Result<String, AnalyzeError>> + Send;
}
