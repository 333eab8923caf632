//! The generation pipeline: prompt construction, the model server client,
//! recovery of a JSON object from model text and schema validation.

pub mod content_generator;
pub mod content_validator;
pub mod error;
pub mod model_client;
pub mod normalizer;
pub mod ollama_transport;
pub mod prompt_builder;

pub use content_generator::ContentGenerator;
pub use error::GenerationError;
pub use model_client::{ModelChoice, ModelClient, ModelServerStatus, OllamaClient, RetryPolicy};
pub use ollama_transport::{GenerateOptions, ModelTransport, OllamaTransport, TransportError};
