//! Ollama completion oracle.
//!
//! Sends one non-streaming `POST /api/generate` per prompt to a local Ollama
//! server. Every failure is mapped onto [`OracleError`]; nothing is retried
//! here because the engine treats a failed completion as "no signal".

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::errors::{OracleError, OracleResult};
use crate::domain::models::CompletionConfig;
use crate::domain::ports::CompletionOracle;

/// Configuration for the Ollama adapter.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server base URL, without a trailing slash.
    pub base_url: String,
    /// Model to generate with.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate (`num_predict`).
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::from(&CompletionConfig::default())
    }
}

impl From<&CompletionConfig> for OllamaConfig {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
        }
    }
}

impl OllamaConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Completion oracle backed by an Ollama server.
pub struct OllamaCompletion {
    config: OllamaConfig,
    client: Client,
}

impl OllamaCompletion {
    pub fn new(config: OllamaConfig) -> OracleResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OracleError::Unavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub const fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn map_send_error(&self, err: &reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            OracleError::Unavailable(format!("{}: {err}", self.config.base_url))
        } else {
            OracleError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionOracle for OllamaCompletion {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> OracleResult<String> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Status { code, body });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Malformed(format!("Failed to parse response: {e}")))?;

        let text = body.response.trim().to_string();
        debug!(model = %self.config.model, reply = %text, "completion received");
        Ok(text)
    }
}
