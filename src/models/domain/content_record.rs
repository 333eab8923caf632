use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{ContentKind, GenerationRecord};

/// Generated content as stored next to its originating request.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContentRecord {
    pub id: String,
    pub request_id: String,
    pub user_id: String,
    pub title: String,
    pub content_type: ContentKind,
    pub content_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    pub fn for_request(request: &GenerationRecord, content_data: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            request_id: request.id.clone(),
            user_id: request.user_id.clone(),
            title: format!(
                "{} {} - {}",
                request.content_type.label(),
                request.topic,
                request.level
            ),
            content_type: request.content_type,
            content_data,
            created_at: now,
            updated_at: now,
        }
    }
}
