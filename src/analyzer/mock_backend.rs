//! # Mock Inference Backend for Testing
//!
//! Provides a `MockBackend` that implements `InferenceBackend` without a model server.
//! It returns a predefined completion or error and records every request it receives.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::analyzer::backend::{InferenceBackend, InferenceRequest};
use crate::analyzer::error::AnalyzeError;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

/// A mock backend for testing purposes.
///
/// Queued replies are consumed in order; once the queue is empty the default reply is
/// repeated. The default reply is an empty completion.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    queued: Arc<Mutex<VecDeque<Reply>>>,
    default: Arc<Mutex<Option<Reply>>>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockBackend {
    /// Creates a mock that answers every request with an empty completion
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `text`
    pub async fn set_text_response(&self, text: &str) {
        *self.default.lock().await = Some(Reply::Text(text.to_string()));
    }

    /// Fail every request with an inference error
    pub async fn set_error(&self, message: &str) {
        *self.default.lock().await = Some(Reply::Failure(message.to_string()));
    }

    /// Answer the next request with `text`
    pub async fn push_text_response(&self, text: &str) {
        self.queued
            .lock()
            .await
            .push_back(Reply::Text(text.to_string()));
    }

    /// Fail the next request with an inference error
    pub async fn push_error(&self, message: &str) {
        self.queued
            .lock()
            .await
            .push_back(Reply::Failure(message.to_string()));
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().await.clone()
    }
}

impl InferenceBackend for MockBackend {
    async fn complete(&self, request: InferenceRequest) -> Result<String, AnalyzeError> {
        self.requests.lock().await.push(request);

        let queued = self.queued.lock().await.pop_front();
        let reply = match queued {
            Some(reply) => Some(reply),
            None => self.default.lock().await.clone(),
        };

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure(message)) => Err(AnalyzeError::Inference(message)),
            None => Ok(String::new()),
        }
    }
}
