use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, CONTENTS},
    errors::AppResult,
    models::domain::ContentRecord,
};

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, content: ContentRecord) -> AppResult<ContentRecord>;
    async fn list_by_request(&self, request_id: &str) -> AppResult<Vec<ContentRecord>>;
}

pub struct MongoContentRepository {
    collection: Collection<ContentRecord>,
}

impl MongoContentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(CONTENTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("id_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder().keys(doc! { "request_id": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        log::info!("Created indexes for contents collection");
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for MongoContentRepository {
    async fn create(&self, content: ContentRecord) -> AppResult<ContentRecord> {
        self.collection.insert_one(&content).await?;
        Ok(content)
    }

    async fn list_by_request(&self, request_id: &str) -> AppResult<Vec<ContentRecord>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": 1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "request_id": request_id })
            .with_options(find_options)
            .await?;
        let contents: Vec<ContentRecord> = cursor.try_collect().await?;

        Ok(contents)
    }
}
