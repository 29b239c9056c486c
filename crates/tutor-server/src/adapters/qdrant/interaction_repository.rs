//! Qdrant implementation of InteractionRepository
//!
//! All interactions share one collection. Each point carries its owner scope
//! key in the payload, and every search is issued with a `must` filter on
//! that key so Qdrant only ranks points from the requested scope.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qdrant_client::qdrant::{
    point_id::PointIdOptions, value::Kind, vectors_config::Config as VectorsConfigKind,
    CollectionInfo, Condition, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder,
    Distance, FieldType, Filter, PointId, PointStruct, ScoredPoint, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use uuid::Uuid;

use tutor::{
    DomainError, Interaction, InteractionMetadata, InteractionRepository, MetadataValue,
    OwnerScope, ScoredInteraction,
};

const SCOPE_KEY: &str = "owner_scope";
const TEXT_KEY: &str = "text";
const CREATED_AT_KEY: &str = "created_at";
const METADATA_PREFIX: &str = "meta_";

/// Qdrant-backed interaction store
pub struct QdrantInteractionRepository {
    client: Qdrant,
    collection: String,
}

impl QdrantInteractionRepository {
    /// Connect and make sure the collection exists with the given vector size
    pub async fn new(
        url: &str,
        api_key: Option<String>,
        collection: impl Into<String>,
        embedding_dim: u64,
    ) -> Result<Self, DomainError> {
        let builder = Qdrant::from_url(url);
        let builder = match api_key {
            Some(key) => builder.api_key(key),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| DomainError::Repository(format!("Failed to create Qdrant client: {e}")))?;

        let repo = Self {
            client,
            collection: collection.into(),
        };
        repo.ensure_collection(embedding_dim).await?;

        Ok(repo)
    }

    async fn ensure_collection(&self, embedding_dim: u64) -> Result<(), DomainError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let has_scope_index = if exists {
            let info = self
                .client
                .collection_info(&self.collection)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?
                .result
                .ok_or_else(|| {
                    DomainError::Repository(format!(
                        "Collection {} returned no info",
                        self.collection
                    ))
                })?;

            match vector_size(&info) {
                Some(size) if size != embedding_dim => {
                    return Err(DomainError::Repository(format!(
                        "Collection {} stores {}-dimensional vectors, embeddings have {}",
                        self.collection, size, embedding_dim
                    )));
                }
                Some(_) => {}
                None => tracing::warn!(
                    "Collection {} has no single vector size, skipping dimension check",
                    self.collection
                ),
            }

            info.payload_schema.contains_key(SCOPE_KEY)
        } else {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(embedding_dim, Distance::Cosine)),
                )
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

            tracing::info!(
                "Created collection {} ({} dimensions)",
                self.collection,
                embedding_dim
            );
            false
        };

        // Keyword index backs the mandatory scope filter
        if !has_scope_index {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.collection,
                    SCOPE_KEY,
                    FieldType::Keyword,
                ))
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

            tracing::info!("Indexed {} on {}", SCOPE_KEY, self.collection);
        }

        Ok(())
    }
}

#[async_trait]
impl InteractionRepository for QdrantInteractionRepository {
    async fn add(&self, interaction: &Interaction, embedding: Vec<f32>) -> Result<(), DomainError> {
        let point = PointStruct::new(
            interaction.id.to_string(),
            embedding,
            payload_from_interaction(interaction),
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, vec![point]).wait(true))
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        tracing::debug!(
            "Stored interaction {} in {}",
            interaction.id,
            interaction.owner_scope
        );

        Ok(())
    }

    async fn search(
        &self,
        scope: &OwnerScope,
        query_vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredInteraction>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let filter = Filter::must([Condition::matches(SCOPE_KEY, scope.key())]);

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query_vector, limit as u64)
                    .filter(filter)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        let results = scored_from_points(search_result.result, scope);

        tracing::debug!("Found {} interactions in {}", results.len(), scope);

        Ok(results)
    }
}

/// Vector size of a collection with a single unnamed vector
fn vector_size(info: &CollectionInfo) -> Option<u64> {
    let vectors = info
        .config
        .as_ref()?
        .params
        .as_ref()?
        .vectors_config
        .as_ref()?;
    match vectors.config.as_ref()? {
        VectorsConfigKind::Params(params) => Some(params.size),
        VectorsConfigKind::ParamsMap(_) => None,
    }
}

/// Convert search hits, dropping (and logging) points that are not interactions
fn scored_from_points(points: Vec<ScoredPoint>, scope: &OwnerScope) -> Vec<ScoredInteraction> {
    let mut results = Vec::with_capacity(points.len());

    for point in points {
        let parsed = point
            .id
            .clone()
            .and_then(uuid_from_point_id)
            .and_then(|id| interaction_from_payload(id, point.payload));
        match parsed {
            Some(interaction) => results.push(ScoredInteraction {
                interaction,
                score: point.score,
            }),
            None => tracing::warn!(
                "Skipped unreadable point {:?} in {}",
                point.id.and_then(|id| id.point_id_options),
                scope
            ),
        }
    }

    results
}

fn payload_from_interaction(interaction: &Interaction) -> HashMap<String, Value> {
    let mut payload: HashMap<String, Value> = [
        (SCOPE_KEY.to_string(), Value::from(interaction.owner_scope.key())),
        (TEXT_KEY.to_string(), Value::from(interaction.text.clone())),
        (
            CREATED_AT_KEY.to_string(),
            Value::from(interaction.created_at.to_rfc3339()),
        ),
    ]
    .into_iter()
    .collect();

    for (key, value) in &interaction.metadata {
        let value = match value {
            MetadataValue::Bool(b) => Value::from(*b),
            MetadataValue::Int(i) => Value::from(*i),
            MetadataValue::Float(f) => Value::from(*f),
            MetadataValue::Text(s) => Value::from(s.clone()),
        };
        payload.insert(format!("{METADATA_PREFIX}{key}"), value);
    }

    payload
}

fn interaction_from_payload(id: Uuid, payload: HashMap<String, Value>) -> Option<Interaction> {
    let mut owner_scope = None;
    let mut text = None;
    let mut created_at = None;
    let mut metadata = InteractionMetadata::new();

    for (key, value) in payload {
        let Some(kind) = value.kind else { continue };
        match key.as_str() {
            SCOPE_KEY => {
                if let Kind::StringValue(s) = kind {
                    owner_scope = s.parse::<OwnerScope>().ok();
                }
            }
            TEXT_KEY => {
                if let Kind::StringValue(s) = kind {
                    text = Some(s);
                }
            }
            CREATED_AT_KEY => {
                if let Kind::StringValue(s) = kind {
                    created_at = DateTime::parse_from_rfc3339(&s)
                        .ok()
                        .map(|t| t.with_timezone(&Utc));
                }
            }
            _ => {
                let Some(name) = key.strip_prefix(METADATA_PREFIX) else {
                    continue;
                };
                let value = match kind {
                    Kind::BoolValue(b) => MetadataValue::Bool(b),
                    Kind::IntegerValue(i) => MetadataValue::Int(i),
                    Kind::DoubleValue(f) => MetadataValue::Float(f),
                    Kind::StringValue(s) => MetadataValue::Text(s),
                    _ => continue,
                };
                metadata.insert(name.to_string(), value);
            }
        }
    }

    Some(Interaction {
        id,
        owner_scope: owner_scope?,
        text: text?,
        metadata,
        created_at: created_at.unwrap_or_else(Utc::now),
    })
}

fn uuid_from_point_id(point_id: PointId) -> Option<Uuid> {
    match point_id.point_id_options? {
        PointIdOptions::Uuid(uuid_str) => Uuid::parse_str(&uuid_str).ok(),
        PointIdOptions::Num(_) => None,
    }
}
