//! Test doubles shared by the unit tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use tutor::{
    CompletionOptions, CompletionResponse, CompletionService, DomainError, EmbeddingService,
    Interaction, InteractionRepository, OwnerScope, ScoredInteraction, UserProfile, UserRepository,
};
use uuid::Uuid;

use crate::adapters::{InMemoryInteractionRepository, SqliteUserRepository};
use crate::application::{InteractionMemory, TutorConfig, TutorService, UserService};
use crate::AppState;

const HASH_DIM: usize = 1024;

/// Deterministic bag-of-words embedder: each lowercase word bumps one bucket
pub struct HashEmbedder;

#[async_trait]
impl EmbeddingService for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let mut vector = vec![0.0f32; HASH_DIM];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            // FNV-1a
            let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
            for byte in word.to_lowercase().bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
            vector[(hash % HASH_DIM as u64) as usize] += 1.0;
        }
        Ok(vector)
    }

    fn model_id(&self) -> &str {
        "hash"
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingService for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, DomainError> {
        Err(DomainError::ExternalService("embedding service unavailable".to_string()))
    }

    fn model_id(&self) -> &str {
        "failing"
    }
}

/// Completion double that replies with a fixed text and remembers prompts
pub struct ScriptedCompletion {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(
        &self,
        prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(CompletionResponse {
            content: self.reply.clone(),
            model: "scripted".to_string(),
            prompt_tokens: None,
            completion_tokens: None,
        })
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

pub struct FailingCompletion;

#[async_trait]
impl CompletionService for FailingCompletion {
    async fn complete(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        Err(DomainError::ExternalService("model offline".to_string()))
    }

    fn model_id(&self) -> &str {
        "failing"
    }
}

/// Repository that can search but refuses every write
#[derive(Default)]
pub struct ReadOnlyRepository {
    inner: InMemoryInteractionRepository,
}

#[async_trait]
impl InteractionRepository for ReadOnlyRepository {
    async fn add(&self, _interaction: &Interaction, _embedding: Vec<f32>) -> Result<(), DomainError> {
        Err(DomainError::Repository("disk full".to_string()))
    }

    async fn search(
        &self,
        scope: &OwnerScope,
        query_vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredInteraction>, DomainError> {
        self.inner.search(scope, query_vector, limit).await
    }
}

/// Profile repository whose reads stall, widening any read-modify-write window
pub struct SlowUserRepository {
    inner: SqliteUserRepository,
}

impl SlowUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: SqliteUserRepository::new(pool),
        }
    }
}

#[async_trait]
impl UserRepository for SlowUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserProfile>, DomainError> {
        let found = self.inner.find_by_id(user_id).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        found
    }

    async fn save(&self, profile: &UserProfile) -> Result<UserProfile, DomainError> {
        self.inner.save(profile).await
    }
}

/// Migrated in-memory SQLite pool. One connection, so every query sees the same database.
pub async fn sqlite_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

/// Full application state over in-memory backends
pub async fn test_state(completion: Arc<dyn CompletionService>) -> AppState {
    let pool = sqlite_pool().await;
    let memory = Arc::new(InteractionMemory::new(
        Arc::new(InMemoryInteractionRepository::new()),
        Arc::new(HashEmbedder),
    ));

    AppState {
        user_service: Arc::new(UserService::new(Arc::new(SqliteUserRepository::new(pool)))),
        tutor_service: Arc::new(TutorService::new(
            memory.clone(),
            completion,
            TutorConfig::default(),
        )),
        memory,
    }
}
