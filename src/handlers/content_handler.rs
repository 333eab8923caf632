use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    middleware::get_request_id,
    models::dto::GenerateContentRequest,
};

#[post("/api/content/generate", wrap = "AuthMiddleware")]
async fn generate_content(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateContentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .content_service
        .generate_for_user(auth.0.user_id(), request.into_inner())
        .await
        .inspect_err(|err| {
            log::error!(
                "Content generation failed [request {}]: {}",
                get_request_id(&req).unwrap_or_default(),
                err
            )
        })?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/content/requests", wrap = "AuthMiddleware")]
async fn list_requests(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let requests = state.content_service.list_requests(auth.0.user_id()).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[get("/api/content/requests/{id}", wrap = "AuthMiddleware")]
async fn get_request(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = state.content_service.get_request(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(request))
}

/// Reports whether the model server is reachable and answering.
///
/// Any failed check is a 500 with the same body.
#[get("/api/content/test-ai")]
async fn test_ai(state: web::Data<AppState>) -> HttpResponse {
    let status = state.content_service.model_status().await;
    if status.available {
        HttpResponse::Ok().json(status)
    } else {
        log::warn!("Model server check failed: {}", status.message);
        HttpResponse::InternalServerError().json(status)
    }
}
