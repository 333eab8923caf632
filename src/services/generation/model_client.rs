use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::{
    ollama_transport::{ModelTransport, OllamaTransport},
    GenerationError,
};
use crate::config::OllamaConfig;

const STATUS_TEST_PROMPT: &str = "Say 'Hello, this is a test'";

/// Sends prompts to the model server and returns its raw text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Tries once, then up to `max_retries` more times on transient failures.
    async fn send(&self, prompt: &str, max_retries: u32) -> Result<String, GenerationError>;

    /// One-shot connectivity report for operators.
    async fn status(&self) -> ModelServerStatus;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelServerStatus {
    pub available: bool,
    pub message: String,
    pub models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_response: Option<String>,
}

/// Exponential backoff between attempts. A zero base delay disables waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn immediate() -> Self {
        Self {
            base_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl From<&OllamaConfig> for RetryPolicy {
    fn from(config: &OllamaConfig) -> Self {
        Self {
            base_backoff: config.retry_backoff,
            max_backoff: config.max_retry_backoff.max(config.retry_backoff),
        }
    }
}

/// Outcome of matching the configured model against the advertised list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice<'a> {
    Configured(&'a str),
    /// The configured model is not installed; this is the first advertised one.
    Fallback(&'a str),
}

impl<'a> ModelChoice<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            ModelChoice::Configured(name) | ModelChoice::Fallback(name) => name,
        }
    }
}

/// Picks the configured model if advertised, else the first advertised one.
///
/// An untagged preferred name also matches its `:latest` tag.
pub fn select_model<'a>(preferred: &str, advertised: &'a [String]) -> Option<ModelChoice<'a>> {
    let latest = format!("{}:latest", preferred);
    advertised
        .iter()
        .find(|name| name.as_str() == preferred || (!preferred.contains(':') && **name == latest))
        .map(|name| ModelChoice::Configured(name.as_str()))
        .or_else(|| advertised.first().map(|name| ModelChoice::Fallback(name.as_str())))
}

pub struct OllamaClient<T: ModelTransport = OllamaTransport> {
    transport: T,
    preferred_model: String,
    retry: RetryPolicy,
}

impl OllamaClient<OllamaTransport> {
    pub fn from_config(config: &OllamaConfig) -> Self {
        Self::new(
            OllamaTransport::new(config),
            config.model.clone(),
            RetryPolicy::from(config),
        )
    }
}

impl<T: ModelTransport> OllamaClient<T> {
    pub fn new(transport: T, preferred_model: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            transport,
            preferred_model: preferred_model.into(),
            retry,
        }
    }

    fn choose_model(&self, advertised: &[String]) -> Result<String, GenerationError> {
        let model = select_model(&self.preferred_model, advertised).ok_or_else(|| {
            GenerationError::MalformedUpstreamResponse(
                "no models available; install a model on the model server first".to_string(),
            )
        })?;

        if let ModelChoice::Fallback(name) = model {
            log::warn!(
                "Model '{}' not found on the model server, using '{}' instead",
                self.preferred_model,
                name
            );
        }
        Ok(model.name().to_string())
    }

    async fn attempt(&self, prompt: &str) -> Result<String, GenerationError> {
        let advertised = self.transport.list_models().await.map_err(|err| {
            GenerationError::ConnectionFailure(format!("liveness probe failed: {}", err))
        })?;

        let model = self.choose_model(&advertised)?;
        log::debug!("Sending prompt ({} bytes) to model '{}'", prompt.len(), model);

        let text = self.transport.generate(&model, prompt).await?;
        Ok(text)
    }
}

#[async_trait]
impl<T: ModelTransport> ModelClient for OllamaClient<T> {
    async fn send(&self, prompt: &str, max_retries: u32) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }

        let attempts = max_retries.saturating_add(1);
        let mut attempt = 1;

        loop {
            log::info!("Model request attempt {}/{}", attempt, attempts);

            let err = match self.attempt(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) => err,
            };

            if !err.is_transient() || attempt >= attempts {
                log::error!(
                    "Model request failed after {} attempt(s): {}",
                    attempt,
                    err
                );
                return Err(err);
            }

            let delay = self.retry.delay_after(attempt);
            log::warn!(
                "Model request attempt {}/{} failed: {}; retrying in {:?}",
                attempt,
                attempts,
                err,
                delay
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }

    async fn status(&self) -> ModelServerStatus {
        let models = match self.transport.list_models().await {
            Ok(models) => models,
            Err(err) => {
                return ModelServerStatus {
                    available: false,
                    message: format!("Failed to connect to the model server: {}", err),
                    models: Vec::new(),
                    selected_model: None,
                    test_response: None,
                }
            }
        };

        let selected =
            select_model(&self.preferred_model, &models).map(|choice| choice.name().to_string());
        let Some(model) = selected else {
            return ModelServerStatus {
                available: false,
                message: "No models available. Please install a model first.".to_string(),
                models,
                selected_model: None,
                test_response: None,
            };
        };

        match self.transport.generate(&model, STATUS_TEST_PROMPT).await {
            Ok(text) => ModelServerStatus {
                available: true,
                message: "Model server is working correctly".to_string(),
                models,
                selected_model: Some(model),
                test_response: Some(text),
            },
            Err(err) => ModelServerStatus {
                available: false,
                message: format!("Test generation failed: {}", err),
                models,
                selected_model: Some(model),
                test_response: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::generation::ollama_transport::{MockModelTransport, TransportError};

    fn advertised(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn client(transport: MockModelTransport) -> OllamaClient<MockModelTransport> {
        OllamaClient::new(transport, "mistral", RetryPolicy::immediate())
    }

    #[test]
    fn select_model_prefers_configured_name() {
        let models = advertised(&["llama3:latest", "mistral:latest"]);
        assert_eq!(
            select_model("mistral", &models),
            Some(ModelChoice::Configured("mistral:latest"))
        );
        assert_eq!(
            select_model("llama3:latest", &models),
            Some(ModelChoice::Configured("llama3:latest"))
        );
    }

    #[test]
    fn select_model_falls_back_to_first_advertised() {
        let models = advertised(&["llama3:latest", "phi3:mini"]);
        assert_eq!(
            select_model("mistral", &models),
            Some(ModelChoice::Fallback("llama3:latest"))
        );
        assert_eq!(select_model("mistral", &[]), None);
    }

    #[test]
    fn select_model_does_not_match_other_tags_of_tagged_name() {
        let models = advertised(&["gemma:2b", "mistral:7b"]);
        assert_eq!(
            select_model("mistral:latest", &models),
            Some(ModelChoice::Fallback("gemma:2b"))
        );
    }

    #[test]
    fn names_sharing_a_prefix_are_a_fallback() {
        let nemo = advertised(&["mistral-nemo:latest"]);
        assert_eq!(
            select_model("mistral", &nemo),
            Some(ModelChoice::Fallback("mistral-nemo:latest"))
        );

        let other_tag = advertised(&["mistral:7b"]);
        let choice = select_model("mistral", &other_tag).unwrap();
        assert_eq!(choice, ModelChoice::Fallback("mistral:7b"));
        assert_eq!(choice.name(), "mistral:7b");
    }

    #[test]
    fn retry_policy_doubles_up_to_cap() {
        let policy = RetryPolicy {
            base_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(350),
        };
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(350));
        assert_eq!(RetryPolicy::immediate().delay_after(5), Duration::ZERO);
    }

    #[tokio::test]
    async fn returns_text_on_first_success() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .times(1)
            .returning(|| Ok(advertised(&["mistral:latest"])));
        transport
            .expect_generate()
            .withf(|model, prompt| model == "mistral:latest" && prompt == "hi")
            .times(1)
            .returning(|_, _| Ok("{\"a\":1}".to_string()));

        let text = client(transport).send("hi", 2).await.unwrap();
        assert_eq!(text, "{\"a\":1}");
    }

    #[tokio::test]
    async fn retries_exactly_max_retries_times_on_timeout() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .times(4)
            .returning(|| Ok(advertised(&["mistral:latest"])));
        transport
            .expect_generate()
            .times(4)
            .returning(|_, _| Err(TransportError::Timeout("deadline exceeded".into())));

        let err = client(transport).send("prompt", 3).await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(_)));
    }

    #[tokio::test]
    async fn failed_probe_is_a_connection_failure_and_skips_generate() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .times(3)
            .returning(|| Err(TransportError::Connect("connection refused".into())));
        transport.expect_generate().never();

        let err = client(transport).send("prompt", 2).await.unwrap_err();
        assert!(matches!(err, GenerationError::ConnectionFailure(msg) if msg.contains("liveness")));
    }

    #[tokio::test]
    async fn probe_timeout_still_counts_as_connection_failure() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .times(1)
            .returning(|| Err(TransportError::Timeout("probe".into())));
        transport.expect_generate().never();

        let err = client(transport).send("prompt", 0).await.unwrap_err();
        assert!(matches!(err, GenerationError::ConnectionFailure(_)));
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let mut transport = MockModelTransport::new();
        let mut seq = mockall::Sequence::new();
        transport
            .expect_list_models()
            .times(2)
            .returning(|| Ok(advertised(&["mistral:latest"])));
        transport
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(TransportError::Status {
                    status: 503,
                    body: "loading".into(),
                })
            });
        transport
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("done".to_string()));

        assert_eq!(client(transport).send("prompt", 1).await.unwrap(), "done");
    }

    #[tokio::test]
    async fn missing_text_field_exhausts_as_malformed_response() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .times(2)
            .returning(|| Ok(advertised(&["mistral:latest"])));
        transport
            .expect_generate()
            .times(2)
            .returning(|_, _| Err(TransportError::Body("no 'response' field".into())));

        let err = client(transport).send("prompt", 1).await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedUpstreamResponse(_)));
    }

    #[tokio::test]
    async fn falls_back_to_first_advertised_model() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .returning(|| Ok(advertised(&["llama3:latest", "phi3:mini"])));
        transport
            .expect_generate()
            .withf(|model, _| model == "llama3:latest")
            .times(1)
            .returning(|_, _| Ok("ok".to_string()));

        assert_eq!(client(transport).send("prompt", 0).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn empty_model_list_is_malformed_response() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .times(2)
            .returning(|| Ok(Vec::new()));
        transport.expect_generate().never();

        let err = client(transport).send("prompt", 1).await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedUpstreamResponse(_)));
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_without_network_calls() {
        let mut transport = MockModelTransport::new();
        transport.expect_list_models().never();
        transport.expect_generate().never();

        let err = client(transport).send("   ", 3).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn status_reports_models_and_test_response() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .returning(|| Ok(advertised(&["mistral:latest"])));
        transport
            .expect_generate()
            .withf(|_, prompt| prompt.contains("Hello, this is a test"))
            .returning(|_, _| Ok("Hello, this is a test".to_string()));

        let status = client(transport).status().await;
        assert!(status.available);
        assert_eq!(status.selected_model.as_deref(), Some("mistral:latest"));
        assert_eq!(status.test_response.as_deref(), Some("Hello, this is a test"));
    }

    #[tokio::test]
    async fn status_reports_unreachable_server() {
        let mut transport = MockModelTransport::new();
        transport
            .expect_list_models()
            .returning(|| Err(TransportError::Connect("refused".into())));

        let status = client(transport).status().await;
        assert!(!status.available);
        assert!(status.models.is_empty());
        assert!(status.message.contains("refused"));
    }
}
