use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::ContentKind;

/// A stored generation request, owned by the user who submitted it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRecord {
    pub id: String,
    pub user_id: String,
    pub topic: String,
    pub level: String,
    pub content_type: ContentKind,
    pub date_created: DateTime<Utc>,
}

impl GenerationRecord {
    pub fn new(user_id: &str, topic: &str, level: &str, content_type: ContentKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            topic: topic.to_string(),
            level: level.to_string(),
            content_type,
            date_created: Utc::now(),
        }
    }
}
