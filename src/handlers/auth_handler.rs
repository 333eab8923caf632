use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    models::dto::{LoginRequest, RegisterRequest},
};

#[post("/api/auth/register")]
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/api/auth/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.authenticate(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/auth/me", wrap = "AuthMiddleware")]
async fn me(state: web::Data<AppState>, auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user(auth.0.user_id()).await?;
    Ok(HttpResponse::Ok().json(user))
}
