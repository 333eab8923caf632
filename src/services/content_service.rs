use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    errors::{AppError, AppResult},
    models::{
        domain::{ContentRecord, GenerationRecord, GenerationRequest},
        dto::{GenerateContentRequest, GenerateContentResponse, GenerationRequestDto},
    },
    repositories::{ContentRepository, GenerationRequestRepository},
    services::generation::{ContentGenerator, ModelServerStatus},
};

/// Generates content for authenticated users and keeps a history of it.
pub struct ContentService {
    generator: ContentGenerator,
    requests: Arc<dyn GenerationRequestRepository>,
    contents: Arc<dyn ContentRepository>,
}

impl ContentService {
    pub fn new(
        generator: ContentGenerator,
        requests: Arc<dyn GenerationRequestRepository>,
        contents: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            generator,
            requests,
            contents,
        }
    }

    /// Runs the generation pipeline and stores the request with its content.
    ///
    /// Nothing is stored when generation fails.
    pub async fn generate_for_user(
        &self,
        user_id: &str,
        body: GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        body.validate()?;

        let kind = body.content_type;
        let request = GenerationRequest::from(body);
        let content = self.generator.generate(&request, kind).await?;

        let record = GenerationRecord::new(
            user_id,
            request.subject.trim(),
            request.grade.trim(),
            kind,
        );
        let content_data = serde_json::to_value(&content)?;

        let record = self.requests.create(record).await?;
        let stored = match self
            .contents
            .create(ContentRecord::for_request(&record, content_data))
            .await
        {
            Ok(stored) => stored,
            Err(err) => {
                log::error!(
                    "Failed to store content for request {}: {}; rolling back",
                    record.id,
                    err
                );
                if let Err(rollback) = self.requests.delete(&record.id).await {
                    log::error!("Rollback of request {} failed: {}", record.id, rollback);
                }
                return Err(err);
            }
        };

        Ok(GenerateContentResponse {
            message: "Content generated successfully".to_string(),
            content,
            request_id: record.id,
            content_id: stored.id,
        })
    }

    pub async fn list_requests(&self, user_id: &str) -> AppResult<Vec<GenerationRequestDto>> {
        let records = self.requests.list_by_user(user_id).await?;

        let mut requests = Vec::with_capacity(records.len());
        for record in records {
            let contents = self.contents.list_by_request(&record.id).await?;
            requests.push(GenerationRequestDto::new(record, contents));
        }
        Ok(requests)
    }

    pub async fn get_request(&self, claims: &Claims, id: &str) -> AppResult<GenerationRequestDto> {
        let record = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Generation request '{}' not found", id)))?;

        require_owner(claims, &record.user_id)?;

        let contents = self.contents.list_by_request(&record.id).await?;
        Ok(GenerationRequestDto::new(record, contents))
    }

    pub async fn model_status(&self) -> ModelServerStatus {
        self.generator.client().status().await
    }
}
