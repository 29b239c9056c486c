//! Server configuration from environment variables

use std::net::SocketAddr;

use anyhow::{bail, Context};

use crate::application::TutorConfig;

/// Which backend holds the interaction vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorStore {
    Qdrant,
    /// Volatile in-process index, lost on restart
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub vector_store: VectorStore,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub qdrant_collection: String,
    pub embedding_dim: u64,
    pub ollama_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub tutor: TutorConfig,
    pub api_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let bind_addr = or("TUTOR_BIND_ADDR", "0.0.0.0:8000");
        let bind_addr = bind_addr
            .parse()
            .with_context(|| format!("Invalid TUTOR_BIND_ADDR: {bind_addr}"))?;

        let vector_store = match or("VECTOR_STORE", "qdrant").to_lowercase().as_str() {
            "qdrant" => VectorStore::Qdrant,
            "memory" => VectorStore::Memory,
            other => bail!("Invalid VECTOR_STORE: {other} (expected qdrant or memory)"),
        };

        let defaults = TutorConfig::default();
        let tutor = TutorConfig {
            history_window: parse_or(&get, "HISTORY_WINDOW", defaults.history_window)?,
            max_conversations: parse_or(&get, "MAX_CONVERSATIONS", defaults.max_conversations)?,
            context_limit: parse_or(&get, "CONTEXT_LIMIT", defaults.context_limit)?,
            temperature: parse_or(&get, "CHAT_TEMPERATURE", defaults.temperature)?,
        };

        Ok(Self {
            bind_addr,
            database_url: or("DATABASE_URL", "sqlite://data/tutor.db?mode=rwc"),
            vector_store,
            qdrant_url: or("QDRANT_URL", "http://localhost:6334"),
            qdrant_api_key: get("QDRANT_API_KEY"),
            qdrant_collection: or("QDRANT_COLLECTION", "tutor_interactions"),
            embedding_dim: parse_or(&get, "EMBEDDING_DIM", 4096)?,
            ollama_url: or("OLLAMA_URL", "http://localhost:11434"),
            chat_model: or("CHAT_MODEL", "mistral:7b-instruct"),
            embedding_model: or("EMBEDDING_MODEL", "mistral:7b-instruct"),
            tutor,
            api_key: get("TUTOR_API_KEY"),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: {raw}")),
        None => Ok(default),
    }
}
