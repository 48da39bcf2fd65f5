//! Ollama chat backend

use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::analyzer::backend::{InferenceBackend, InferenceRequest};
use crate::analyzer::config::AnalyzerConfig;
use crate::analyzer::error::AnalyzeError;
use crate::http::{HttpOptions, build_client};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for the Ollama `/api/chat` endpoint
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: ReqwestClient,
    base_url: String,
}

impl OllamaBackend {
    /// Create a backend for the server and timeout named in `config`
    pub fn new(config: &AnalyzerConfig) -> crate::Result<Self> {
        let client = build_client(&HttpOptions {
            timeout: config.timeout(),
            ..Default::default()
        })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

impl InferenceBackend for OllamaBackend {
    #[instrument(skip(self, request), fields(model = %request.model), level = "debug")]
    async fn complete(&self, request: InferenceRequest) -> Result<String, AnalyzeError> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream: false,
            format: request.json_format.then_some("json"),
            options: ChatOptions {
                temperature: request.temperature,
            },
        };

        debug!("Sending chat request ({} prompt bytes)", request.prompt.len());
        let response = self.client.post(self.chat_url()).json(&body).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Backend error: {} - {}", status, response_text);
            return Err(AnalyzeError::Inference(format!(
                "backend returned {}: {}",
                status, response_text
            )));
        }

        let chat: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            AnalyzeError::Inference(format!("unexpected backend response: {}", e))
        })?;

        Ok(chat.message.content)
    }
}
