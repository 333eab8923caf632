use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{ContentKind, GenerationRequest};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of `POST /api/content/generate`.
///
/// Missing `subject`/`grade` fail deserialization (400); present but empty
/// values fail validation (422).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = 50))]
    pub grade: String,

    #[validate(length(max = 200))]
    pub topic: Option<String>,

    #[validate(length(max = 2000))]
    pub learning_objectives: Option<String>,

    #[serde(default)]
    pub content_type: ContentKind,
}

impl From<GenerateContentRequest> for GenerationRequest {
    fn from(body: GenerateContentRequest) -> Self {
        GenerationRequest {
            subject: body.subject,
            grade: body.grade,
            topic: body.topic,
            learning_objectives: body.learning_objectives,
        }
    }
}
