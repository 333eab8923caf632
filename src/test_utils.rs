use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
    repositories::UserRepository,
};

pub mod fixtures {
    use serde_json::{json, Value};

    use crate::models::domain::User;

    pub fn test_user() -> User {
        User::new("testuser", "test@example.com", "not-a-real-hash")
    }

    /// A well-formed quiz the way a model is asked to return it.
    pub fn quiz_value(question_count: usize) -> Value {
        let questions: Vec<Value> = (0..question_count)
            .map(|i| {
                json!({
                    "question": format!("Which fraction equals {}/8?", i + 1),
                    "options": [
                        format!("{}/16", 2 * (i + 1)),
                        format!("{}/16", i + 1),
                        format!("{}/4", i + 1),
                        format!("{}/2", i + 1),
                    ],
                    "correct_answer": 0,
                    "explanation": "Multiply numerator and denominator by 2."
                })
            })
            .collect();

        json!({ "questions": questions })
    }
}

/// [`UserRepository`] backed by a map, keyed by user id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::AlreadyExists(
                "User with this email already exists".to_string(),
            ));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_fixtures_quiz_value() {
        let quiz = quiz_value(5);
        let questions = quiz["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[2]["options"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_in_memory_user_repository() {
        let repository = InMemoryUserRepository::default();
        let user = repository.create(test_user()).await.unwrap();

        let by_email = repository.find_by_email("test@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id.clone()));
        assert!(repository.find_by_id("missing").await.unwrap().is_none());

        let mut same_email = test_user();
        same_email.id = "another-id".to_string();
        assert!(matches!(
            repository.create(same_email).await,
            Err(crate::errors::AppError::AlreadyExists(_))
        ));
    }
}
