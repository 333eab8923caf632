use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, GENERATION_REQUESTS},
    errors::{AppError, AppResult},
    models::domain::GenerationRecord,
};

#[async_trait]
pub trait GenerationRequestRepository: Send + Sync {
    async fn create(&self, record: GenerationRecord) -> AppResult<GenerationRecord>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<GenerationRecord>>;
    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<GenerationRecord>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoGenerationRequestRepository {
    collection: Collection<GenerationRecord>,
}

impl MongoGenerationRequestRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(GENERATION_REQUESTS);
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
            IndexModel::builder()
                .keys(doc! { "user_id": 1, "date_created": -1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        log::info!("Created indexes for generation_requests collection");
        Ok(())
    }
}

#[async_trait]
impl GenerationRequestRepository for MongoGenerationRequestRepository {
    async fn create(&self, record: GenerationRecord) -> AppResult<GenerationRecord> {
        self.collection.insert_one(&record).await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<GenerationRecord>> {
        let record = self.collection.find_one(doc! { "id": id }).await?;
        Ok(record)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<GenerationRecord>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "date_created": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .with_options(find_options)
            .await?;
        let records: Vec<GenerationRecord> = cursor.try_collect().await?;

        Ok(records)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Generation request '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
