pub mod content_record;
pub mod generation_record;
pub mod generation_request;
pub mod structured_content;
pub mod user;

pub use content_record::ContentRecord;
pub use generation_record::GenerationRecord;
pub use generation_request::GenerationRequest;
pub use structured_content::{
    ContentKind, Exercise, Question, Quiz, StructuredContent, Summary, OPTIONS_PER_QUESTION,
};
pub use user::User;
