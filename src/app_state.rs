use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ContentRepository, GenerationRequestRepository, MongoContentRepository,
        MongoGenerationRequestRepository, MongoUserRepository, UserRepository,
    },
    services::{
        generation::{ContentGenerator, ModelClient, OllamaClient},
        ContentService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub content_service: Arc<ContentService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let request_repository = Arc::new(MongoGenerationRequestRepository::new(&db));
        request_repository.ensure_indexes().await?;

        let content_repository = Arc::new(MongoContentRepository::new(&db));
        content_repository.ensure_indexes().await?;

        let model_client = Arc::new(OllamaClient::from_config(&config.ollama));
        log::info!(
            "Using model server at {} (model '{}', {} retries)",
            config.ollama.base_url,
            config.ollama.model,
            config.ollama.max_retries
        );

        Ok(Self::with_components(
            config,
            user_repository,
            request_repository,
            content_repository,
            model_client,
        ))
    }

    /// Wires services around the given repositories and model client.
    pub fn with_components(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        request_repository: Arc<dyn GenerationRequestRepository>,
        content_repository: Arc<dyn ContentRepository>,
        model_client: Arc<dyn ModelClient>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let user_service = Arc::new(UserService::new(
            user_repository,
            jwt_service.clone(),
            config.bcrypt_cost,
        ));

        let generator = ContentGenerator::new(model_client, config.ollama.max_retries);
        let content_service = Arc::new(ContentService::new(
            generator,
            request_repository,
            content_repository,
        ));

        Self {
            user_service,
            content_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
