use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

pub fn require_owner(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.sub != resource_owner {
        return Err(AppError::Unauthorized(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims(user_id: &str) -> Claims {
        Claims {
            sub: user_id.to_string(),
            username: "john".to_string(),
            email: "john@example.com".to_string(),
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_require_owner_as_owner() {
        let claims = create_test_claims("user-1");
        assert!(require_owner(&claims, "user-1").is_ok());
    }

    #[test]
    fn test_require_owner_failure() {
        let claims = create_test_claims("user-1");
        assert!(matches!(
            require_owner(&claims, "user-2"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
