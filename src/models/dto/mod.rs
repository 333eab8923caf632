pub mod request;
pub mod response;

pub use request::{GenerateContentRequest, LoginRequest, RegisterRequest};
pub use response::{
    AuthResponse, ContentDto, GenerateContentResponse, GenerationRequestDto, HealthResponse,
    MessageResponse, UserDto,
};
