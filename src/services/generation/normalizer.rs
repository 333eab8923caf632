use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::GenerationError;

/// Greedy span from the first `{` to the last `}`.
static JSON_OBJECT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON_OBJECT_SPAN is a valid regex pattern"));

pub type ParsedObject = Map<String, Value>;

/// No JSON object could be recovered from the model text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse model output as a JSON object")]
pub struct RecoveryFailure {
    pub raw: String,
}

impl RecoveryFailure {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Best-effort payload callers can return instead of the content.
    pub fn into_error_payload(self) -> Value {
        json!({
            "error": "Could not parse AI response as JSON",
            "raw_response": self.raw,
        })
    }
}

impl From<RecoveryFailure> for GenerationError {
    fn from(failure: RecoveryFailure) -> Self {
        GenerationError::ParseFailure { raw: failure.raw }
    }
}

/// Extracts a JSON object from free-form model output.
pub fn normalize(raw: &str) -> Result<ParsedObject, RecoveryFailure> {
    let trimmed = raw.trim();

    if let Some(object) = parse_object(trimmed) {
        return Ok(object);
    }

    if let Some(span) = JSON_OBJECT_SPAN.find(trimmed) {
        if let Some(object) = parse_object(span.as_str()) {
            log::debug!(
                "Recovered JSON object from model output ({} of {} bytes)",
                span.len(),
                trimmed.len()
            );
            return Ok(object);
        }
    }

    Err(RecoveryFailure::new(raw))
}

fn parse_object(text: &str) -> Option<ParsedObject> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}
