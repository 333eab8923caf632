use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto},
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        jwt_service: Arc<JwtService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repository,
            jwt_service,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let email = request.email.trim().to_lowercase();
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = User::new(request.username.trim(), &email, &password_hash);
        let user = self.repository.create(user).await?;
        log::info!("Registered user {}", user.id);

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            message: Some("User registered successfully".to_string()),
            token,
            user: UserDto::from(user),
        })
    }

    pub async fn authenticate(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let email = request.email.trim().to_lowercase();
        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Failed login attempt for user {}", user.id);
            return Err(invalid());
        }

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            message: None,
            token,
            user: UserDto::from(user),
        })
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<UserDto> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user_id)))?;

        Ok(UserDto::from(user))
    }
}
