#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use edugen_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{ContentRecord, GenerationRecord, User},
    repositories::{ContentRepository, GenerationRequestRepository, UserRepository},
    services::generation::{GenerationError, ModelClient, ModelServerStatus},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
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

#[derive(Default)]
pub struct InMemoryGenerationRequestRepository {
    records: RwLock<Vec<GenerationRecord>>,
}

impl InMemoryGenerationRequestRepository {
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl GenerationRequestRepository for InMemoryGenerationRequestRepository {
    async fn create(&self, record: GenerationRecord) -> AppResult<GenerationRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<GenerationRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<GenerationRecord>> {
        let records = self.records.read().await;
        let mut owned: Vec<_> = records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        Ok(owned)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(AppError::NotFound(format!(
                "Generation request '{}' not found",
                id
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryContentRepository {
    contents: RwLock<Vec<ContentRecord>>,
    fail_writes: AtomicBool,
}

impl InMemoryContentRepository {
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.contents.read().await.len()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(&self, content: ContentRecord) -> AppResult<ContentRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("write refused".to_string()));
        }
        self.contents.write().await.push(content.clone());
        Ok(content)
    }

    async fn list_by_request(&self, request_id: &str) -> AppResult<Vec<ContentRecord>> {
        let contents = self.contents.read().await;
        Ok(contents
            .iter()
            .filter(|content| content.request_id == request_id)
            .cloned()
            .collect())
    }
}

/// Replays queued replies in order and records every prompt it receives.
#[derive(Default)]
pub struct ScriptedModelClient {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<(String, u32)>>,
}

impl ScriptedModelClient {
    pub fn replying(replies: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<(String, u32)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn send(&self, prompt: &str, max_retries: u32) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_retries));
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GenerationError::ConnectionFailure(
                "no scripted reply left".to_string(),
            ))
        })
    }

    async fn status(&self) -> ModelServerStatus {
        ModelServerStatus {
            available: true,
            message: "Model server is working correctly".to_string(),
            models: vec!["mistral:latest".to_string()],
            selected_model: Some("mistral:latest".to_string()),
            test_response: Some("Hello, this is a test".to_string()),
        }
    }
}

/// Everything a test needs to inspect after driving the app.
pub struct TestContext {
    pub state: AppState,
    pub requests: Arc<InMemoryGenerationRequestRepository>,
    pub contents: Arc<InMemoryContentRepository>,
    pub model: Arc<ScriptedModelClient>,
}

pub fn test_context(replies: Vec<Result<String, GenerationError>>) -> TestContext {
    let requests = Arc::new(InMemoryGenerationRequestRepository::default());
    let contents = Arc::new(InMemoryContentRepository::default());
    let model = ScriptedModelClient::replying(replies);

    let state = AppState::with_components(
        Config::test_config(),
        Arc::new(InMemoryUserRepository::default()),
        requests.clone(),
        contents.clone(),
        model.clone(),
    );

    TestContext {
        state,
        requests,
        contents,
        model,
    }
}

/// In-memory app state talking to a real model client.
pub fn state_with_model(model: Arc<dyn ModelClient>) -> AppState {
    AppState::with_components(
        Config::test_config(),
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(InMemoryGenerationRequestRepository::default()),
        Arc::new(InMemoryContentRepository::default()),
        model,
    )
}

pub fn quiz_value(question_count: usize) -> Value {
    let questions: Vec<Value> = (0..question_count)
        .map(|i| {
            json!({
                "question": format!("Which fraction is equivalent to {}/{}?", 1, i + 2),
                "options": [
                    format!("{}/{}", 2, 2 * (i + 2)),
                    format!("{}/{}", 2, i + 2),
                    format!("{}/{}", i + 2, 1),
                    "none of these",
                ],
                "correct_answer": 0,
                "explanation": "Multiplying top and bottom by the same number keeps the value."
            })
        })
        .collect();

    json!({ "questions": questions })
}

pub fn exercise_value() -> Value {
    json!({
        "title": "Adding unlike fractions",
        "description": "Add 1/3 and 1/6.",
        "steps": ["Find a common denominator", "Rewrite 1/3 as 2/6", "Add the numerators"],
        "solution": "1/3 + 1/6 = 3/6 = 1/2",
        "hints": ["6 is a multiple of 3"]
    })
}
