//! Google Gemini chat client (OpenAI-compatible beta endpoint).

use std::time::Duration;

use secrecy::SecretString;

use safehaven_core::chat::{ChunkStream, ModelClient, ModelConnector};
use safehaven_types::chat::ModelRequest;
use safehaven_types::error::ModelError;

use super::streaming::create_completion_stream;
use super::types::ChatCompletionRequest;

/// Base URL of Gemini's OpenAI-compatible API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Creates [`GeminiClient`]s sharing one HTTP connection pool.
pub struct GeminiConnector {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiConnector {
    /// Connector for the public Gemini endpoint.
    pub fn new() -> Result<Self, ModelError> {
        Self::with_base_url(GEMINI_BASE_URL)
    }

    /// Connector for any OpenAI-compatible endpoint.
    pub fn with_base_url(base_url: &str) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ModelError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ModelConnector for GeminiConnector {
    type Client = GeminiClient;

    fn connect(&self, api_key: SecretString, model: &str) -> Result<GeminiClient, ModelError> {
        Ok(GeminiClient {
            http: self.http.clone(),
            url: format!("{}/chat/completions", self.base_url),
            api_key,
            model: model.to_string(),
        })
    }
}

/// A chat session with one Gemini model.
///
/// The API key is only exposed when building the Authorization header.
pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: SecretString,
    model: String,
}

impl GeminiClient {
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn stream(&self, request: ModelRequest) -> ChunkStream {
        let body = ChatCompletionRequest::streaming(&self.model, &request);
        create_completion_stream(&self.http, &self.url, body, &self.api_key)
    }
}
