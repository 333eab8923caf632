use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{ContentKind, ContentRecord, GenerationRecord, StructuredContent, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    pub message: String,
    pub content: StructuredContent,
    pub request_id: String,
    pub content_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentDto {
    pub id: String,
    pub title: String,
    pub content_type: ContentKind,
    pub content_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl From<ContentRecord> for ContentDto {
    fn from(content: ContentRecord) -> Self {
        ContentDto {
            id: content.id,
            title: content.title,
            content_type: content.content_type,
            content_data: content.content_data,
            created_at: content.created_at,
        }
    }
}

/// A stored request together with the content generated for it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequestDto {
    pub id: String,
    pub topic: String,
    pub level: String,
    pub content_type: ContentKind,
    pub date_created: DateTime<Utc>,
    pub contents: Vec<ContentDto>,
}

impl GenerationRequestDto {
    pub fn new(record: GenerationRecord, contents: Vec<ContentRecord>) -> Self {
        GenerationRequestDto {
            id: record.id,
            topic: record.topic,
            level: record.level,
            content_type: record.content_type,
            date_created: record.date_created,
            contents: contents.into_iter().map(ContentDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
