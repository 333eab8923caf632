use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::GenerationError;
use crate::config::OllamaConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Connect(err.to_string())
        }
    }
}

impl From<TransportError> for GenerationError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connect(msg) => GenerationError::ConnectionFailure(msg),
            TransportError::Timeout(msg) => GenerationError::Timeout(msg),
            other @ (TransportError::Status { .. } | TransportError::Body(_)) => {
                GenerationError::MalformedUpstreamResponse(other.to_string())
            }
        }
    }
}

/// Raw access to a model server: list installed models, generate text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn list_models(&self) -> Result<Vec<String>, TransportError>;
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, TransportError>;
}

/// Sampling parameters sent with every generate call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
}

impl From<&OllamaConfig> for GenerateOptions {
    fn from(config: &OllamaConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            num_predict: config.num_predict,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponseBody {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    #[serde(default)]
    name: String,
}

/// HTTP transport for the Ollama API.
#[derive(Clone)]
pub struct OllamaTransport {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    probe_timeout: Duration,
    options: GenerateOptions,
}

impl OllamaTransport {
    pub fn new(config: &OllamaConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &OllamaConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout,
            probe_timeout: config.probe_timeout,
            options: GenerateOptions::from(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ModelTransport for OllamaTransport {
    async fn list_models(&self) -> Result<Vec<String>, TransportError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.probe_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(TransportError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let tags: TagsResponseBody = response.json().await?;
        Ok(tags
            .models
            .into_iter()
            .map(|tag| tag.name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, TransportError> {
        let body = GenerateRequestBody {
            model,
            prompt,
            stream: false,
            options: &self.options,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.request_timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Model server returned {}: {}", status, body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponseBody = response.json().await?;
        reply.response.ok_or_else(|| {
            TransportError::Body("no 'response' field in model server reply".to_string())
        })
    }
}
