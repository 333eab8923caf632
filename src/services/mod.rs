pub mod content_service;
pub mod generation;
pub mod user_service;

pub use content_service::ContentService;
pub use user_service::UserService;
