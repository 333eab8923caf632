pub mod auth_handler;
pub mod content_handler;
pub mod health_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

pub use auth_handler::{login, me, register};
pub use content_handler::{generate_content, get_request, list_requests, test_ai};
pub use health_handler::health_check;

/// Malformed or incomplete JSON bodies are reported as 400 in the usual
/// error shape instead of actix's plain-text default.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// Registers every route of the API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health_check)
        .service(register)
        .service(login)
        .service(me)
        .service(generate_content)
        .service(list_requests)
        .service(get_request)
        .service(test_ai);
}
