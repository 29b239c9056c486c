use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tutor::{CompletionService, EmbeddingService, InteractionRepository};
use tutor_server::adapters::{
    sqlite, InMemoryInteractionRepository, OllamaCompletion, OllamaEmbedding,
    QdrantInteractionRepository, SqliteUserRepository,
};
use tutor_server::application::{InteractionMemory, TutorService, UserService};
use tutor_server::auth::ApiKey;
use tutor_server::config::{AppConfig, VectorStore};
use tutor_server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    tracing::info!("🎓 Tutor API initializing...");

    let config = AppConfig::from_env()?;

    let api_key = ApiKey::new(config.api_key.clone());
    if api_key.is_enabled() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No TUTOR_API_KEY set - authentication disabled");
    }

    // Learner profiles
    let pool = sqlite::connect(&config.database_url).await?;
    tracing::info!("✅ Profile database ready: {}", config.database_url);

    // Interaction memory
    let interactions: Arc<dyn InteractionRepository> = match config.vector_store {
        VectorStore::Qdrant => {
            let repo = QdrantInteractionRepository::new(
                &config.qdrant_url,
                config.qdrant_api_key.clone(),
                config.qdrant_collection.clone(),
                config.embedding_dim,
            )
            .await
            .with_context(|| format!("Failed to connect to Qdrant at {}", config.qdrant_url))?;
            tracing::info!(
                "🌊 Qdrant connected: {} ({})",
                config.qdrant_url,
                config.qdrant_collection
            );
            Arc::new(repo)
        }
        VectorStore::Memory => {
            tracing::warn!("⚠️  VECTOR_STORE=memory - interactions are lost on restart");
            Arc::new(InMemoryInteractionRepository::new())
        }
    };

    let embedding: Arc<dyn EmbeddingService> = Arc::new(OllamaEmbedding::new(
        config.ollama_url.clone(),
        config.embedding_model.clone(),
    ));
    let completion = Arc::new(OllamaCompletion::new(
        config.ollama_url.clone(),
        config.chat_model.clone(),
    ));
    tracing::info!(
        "🧠 Ollama at {} (chat: {}, embeddings: {})",
        config.ollama_url,
        completion.model_id(),
        embedding.model_id()
    );

    // Application services
    let memory = Arc::new(InteractionMemory::new(interactions, embedding));
    let tutor_service = Arc::new(TutorService::new(
        memory.clone(),
        completion,
        config.tutor.clone(),
    ));
    let user_service = Arc::new(UserService::new(Arc::new(SqliteUserRepository::new(pool))));

    let state = AppState {
        user_service,
        tutor_service,
        memory,
    };

    let router = build_router(state, api_key);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Tutor API listening on {}", config.bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
