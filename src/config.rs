use std::{env, str::FromStr, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub bcrypt_cost: u32,
    pub ollama: OllamaConfig,
}

/// Settings for the model server and the retry policy around it.
#[derive(Clone, Debug, PartialEq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub max_retry_backoff: Duration,
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env_string_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: env_string_or("MONGO_DB_NAME", "edugen-local"),
            web_server_host: env_string_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: env_or("WEB_SERVER_PORT", 5000),
            cors_allowed_origin: env_string_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            jwt_secret: SecretString::from(env_string_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            jwt_expiration_hours: env_or("JWT_EXPIRATION_HOURS", 24),
            bcrypt_cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            ollama: OllamaConfig::from_env(),
        }
    }

    /// Rejects secrets that are still on their development defaults.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    /// Fixed configuration used by tests; never reads the environment.
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "edugen-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            bcrypt_cost: 4,
            ollama: OllamaConfig::default(),
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string_or("OLLAMA_BASE_URL", &defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            model: env_string_or("OLLAMA_MODEL", &defaults.model),
            request_timeout: Duration::from_secs(env_or(
                "OLLAMA_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            probe_timeout: Duration::from_secs(env_or(
                "OLLAMA_PROBE_TIMEOUT_SECS",
                defaults.probe_timeout.as_secs(),
            )),
            max_retries: env_or("OLLAMA_MAX_RETRIES", defaults.max_retries),
            retry_backoff: Duration::from_millis(env_or(
                "OLLAMA_RETRY_BACKOFF_MS",
                defaults.retry_backoff.as_millis() as u64,
            )),
            max_retry_backoff: Duration::from_millis(env_or(
                "OLLAMA_MAX_RETRY_BACKOFF_MS",
                defaults.max_retry_backoff.as_millis() as u64,
            )),
            temperature: env_or("OLLAMA_TEMPERATURE", defaults.temperature),
            top_p: env_or("OLLAMA_TOP_P", defaults.top_p),
            num_predict: env_or("OLLAMA_NUM_PREDICT", defaults.num_predict),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            request_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_backoff: Duration::from_millis(250),
            max_retry_backoff: Duration::from_secs(4),
            temperature: 0.7,
            top_p: 0.9,
            num_predict: 500,
        }
    }
}
