use std::sync::Arc;

use super::{
    content_validator, model_client::ModelClient, normalizer, prompt_builder::build_prompt,
    GenerationError,
};
use crate::models::domain::{ContentKind, GenerationRequest, StructuredContent};

/// Runs the whole pipeline for one request: prompt, model, recovery, validation.
#[derive(Clone)]
pub struct ContentGenerator {
    client: Arc<dyn ModelClient>,
    max_retries: u32,
}

impl ContentGenerator {
    pub fn new(client: Arc<dyn ModelClient>, max_retries: u32) -> Self {
        Self {
            client,
            max_retries,
        }
    }

    pub fn client(&self) -> &Arc<dyn ModelClient> {
        &self.client
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
        kind: ContentKind,
    ) -> Result<StructuredContent, GenerationError> {
        request.validate()?;

        let prompt = build_prompt(request, kind);
        let raw = self.client.send(&prompt, self.max_retries).await?;

        let parsed = normalizer::normalize(&raw).map_err(|failure| {
            log::warn!(
                "Model output for {} '{}' is not JSON ({} bytes)",
                kind,
                request.subject.trim(),
                failure.raw.len()
            );
            GenerationError::from(failure)
        })?;

        let content = content_validator::validate(&parsed, kind).map_err(|violation| {
            log::warn!("Rejected generated {}: {}", kind, violation);
            GenerationError::from(violation)
        })?;

        log::info!(
            "Generated {} for subject '{}' ({})",
            kind,
            request.subject.trim(),
            request.grade.trim()
        );
        Ok(content)
    }
}
