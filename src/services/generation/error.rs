use thiserror::Error;

use super::content_validator::SchemaViolation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model server unreachable: {0}")]
    ConnectionFailure(String),

    #[error("Model server timed out: {0}")]
    Timeout(String),

    #[error("Malformed response from model server: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Could not extract a JSON object from the model output")]
    ParseFailure { raw: String },

    #[error("Generated content is invalid: {0}")]
    SchemaViolation(SchemaViolation),
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::InvalidInput(_) => "INVALID_INPUT",
            GenerationError::ConnectionFailure(_) => "CONNECTION_FAILURE",
            GenerationError::Timeout(_) => "TIMEOUT",
            GenerationError::MalformedUpstreamResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
            GenerationError::ParseFailure { .. } => "PARSE_FAILURE",
            GenerationError::SchemaViolation(_) => "SCHEMA_VIOLATION",
        }
    }

    /// Failures the model client retries locally.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::ConnectionFailure(_)
                | GenerationError::Timeout(_)
                | GenerationError::MalformedUpstreamResponse(_)
        )
    }
}

impl From<SchemaViolation> for GenerationError {
    fn from(violation: SchemaViolation) -> Self {
        GenerationError::SchemaViolation(violation)
    }
}
