pub mod content_repository;
pub mod generation_request_repository;
pub mod user_repository;

pub use content_repository::{ContentRepository, MongoContentRepository};
pub use generation_request_repository::{
    GenerationRequestRepository, MongoGenerationRequestRepository,
};
pub use user_repository::{MongoUserRepository, UserRepository};
