//! Tutor API Server
//!
//! HTTP surface and infrastructure adapters for the tutoring service:
//! Qdrant-backed interaction memory, SQLite learner profiles and an
//! Ollama-hosted model for answers, quizzes and embeddings.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod adapters;
pub mod application;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;

#[cfg(test)]
mod testing;

use adapters::SqliteUserRepository;
use application::{InteractionMemory, TutorService, UserService};
use auth::ApiKey;

/// Type alias for the user service with its concrete repository
pub type AppUserService = UserService<SqliteUserRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<AppUserService>,
    pub tutor_service: Arc<TutorService>,
    pub memory: Arc<InteractionMemory>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthCheck)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Tutor API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Assemble the full HTTP application
pub fn build_router(state: AppState, api_key: ApiKey) -> Router {
    // Protected routes (require authentication when a key is configured)
    let protected_routes = Router::new()
        .merge(routes::chat::router())
        .merge(routes::users::router())
        .merge(routes::memory::router())
        .merge(routes::quiz::router())
        .merge(routes::lessons::router())
        .layer(middleware::from_fn_with_state(api_key, auth::auth_middleware));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tutor::OwnerScope;

    use crate::models::{ChatResponse, CreateUserResponse, QuizResponse, UserProfileResponse};
    use crate::testing::{test_state, FailingCompletion, ScriptedCompletion};

    const QUIZ_TEXT: &str = "Q: What is a pointer?\nA) A variable holding an address\nB) A loop\nC) A macro\nD) A header\nCorrect: A\nExplanation: Pointers store addresses.\n---\nQ: Which operator dereferences?\nA) &\nB) *\nC) ->\nD) %\nCorrect: B\nExplanation: Unary * reads through a pointer.\n---\nQ: Incomplete\nA) only one option\n---";

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).unwrap()
    }

    async fn create_user(app: &Router, name: &str) -> String {
        let (status, body) = send(app, Method::POST, &format!("/api/users?name={name}"), None).await;
        assert_eq!(status, StatusCode::OK);
        parse::<CreateUserResponse>(&body).user_id.to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::default());

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<HealthCheck>(&body).status, "ok");
    }

    #[tokio::test]
    async fn test_chat_is_remembered_for_the_user() {
        let state = test_state(Arc::new(ScriptedCompletion::new(
            "A pointer stores the address of another variable.",
        )))
        .await;
        let memory = state.memory.clone();
        let app = build_router(state, ApiKey::default());

        let user_id = create_user(&app, "Ada").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat",
            Some(json!({"message": "Explain pointers", "user_id": user_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response = parse::<ChatResponse>(&body).response;
        assert!(!response.is_empty());

        let recalled = memory
            .retrieve(&OwnerScope::user(user_id.as_str()), "pointers", 5)
            .await
            .unwrap();
        assert!(recalled.contains(&format!("Q: Explain pointers\nA: {response}")));

        let other = memory
            .retrieve(&OwnerScope::user("someone-else"), "pointers", 5)
            .await
            .unwrap();
        assert!(other.is_empty());

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/users/{user_id}/memories/search"),
            Some(json!({"query": "pointers"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let hits: Vec<Value> = parse(&body);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["metadata"]["type"], "qa");
    }

    #[tokio::test]
    async fn test_chat_for_unknown_user_still_answers() {
        let state = test_state(Arc::new(ScriptedCompletion::new("Hello!"))).await;
        let app = build_router(state, ApiKey::default());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat",
            Some(json!({"message": "hi", "user_id": "guest"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<ChatResponse>(&body).response, "Hello!");
    }

    #[tokio::test]
    async fn test_chat_model_failure_is_500_with_detail() {
        let state = test_state(Arc::new(FailingCompletion)).await;
        let app = build_router(state, ApiKey::default());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/chat",
            Some(json!({"message": "Explain pointers", "user_id": "u1"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail: Value = parse(&body);
        assert!(detail["detail"].as_str().unwrap().contains("model offline"));
    }

    #[tokio::test]
    async fn test_malformed_requests_get_detail_body() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::default());

        let (status, body) = send(&app, Method::POST, "/api/chat", Some(json!({"user_id": "u1"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let detail: Value = parse(&body);
        assert!(detail["detail"].as_str().unwrap().contains("message"));

        let (status, body) = send(&app, Method::POST, "/api/quiz/pointers?difficulty=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let detail: Value = parse(&body);
        assert!(detail["detail"].is_string());

        let (status, body) = send(&app, Method::POST, "/api/users", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let detail: Value = parse(&body);
        assert!(detail["detail"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_get_user_and_not_found() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::default());
        let user_id = create_user(&app, "Ada").await;

        let (status, body) = send(&app, Method::GET, &format!("/api/users/{user_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let profile: UserProfileResponse = parse(&body);
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.current_level, 1);
        assert_eq!(profile.average_score, None);

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/users/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let detail: Value = parse(&body);
        assert_eq!(detail["detail"], "User not found");

        let (status, _) = send(&app, Method::GET, "/api/users/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_user_with_blank_name_is_400() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::default());

        let (status, _) = send(&app, Method::POST, "/api/users?name=%20", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_progress_endpoints() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::default());
        let user_id = create_user(&app, "Ada").await;

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/users/{user_id}/level"),
            Some(json!({"level": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/users/{user_id}/lessons"),
            Some(json!({"lesson_id": "pointers-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/quiz/submit",
            Some(json!({
                "user_id": user_id,
                "topic": "pointers",
                "score": 80.0,
                "timestamp": "2025-01-01T12:00:00Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let profile: UserProfileResponse = parse(&body);
        assert_eq!(profile.current_level, 3);
        assert_eq!(profile.completed_lessons, vec!["pointers-1".to_string()]);
        assert_eq!(profile.quiz_scores["pointers"], 80.0);
        assert_eq!(profile.average_score, Some(80.0));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/quiz/submit",
            Some(json!({"user_id": user_id, "topic": "pointers", "score": 120.0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/users/{user_id}/level"),
            Some(json!({"level": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_quiz_generation_drops_malformed_questions() {
        let state = test_state(Arc::new(ScriptedCompletion::new(QUIZ_TEXT))).await;
        let app = build_router(state, ApiKey::default());

        let (status, body) = send(&app, Method::POST, "/api/quiz/pointers?num_questions=3", None).await;
        assert_eq!(status, StatusCode::OK);
        let quiz: QuizResponse = parse(&body);
        assert_eq!(quiz.quiz.len(), 2);
        assert_eq!(quiz.quiz[0].correct_answer, 0);
        assert_eq!(quiz.quiz[1].correct_answer, 1);
        assert_eq!(quiz.quiz[1].options.len(), 4);
        assert_eq!(quiz.quiz[0].difficulty, 5);

        let (status, _) = send(&app, Method::POST, "/api/quiz/pointers?difficulty=11", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lessons_are_shared_and_searchable() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::default());

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/lessons",
            Some(json!({
                "lesson_id": "pointers-1",
                "title": "Pointers",
                "level": 2,
                "content": "Pointers hold memory addresses and are dereferenced with *."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/lessons/search",
            Some(json!({"query": "pointers addresses", "limit": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let hits: Vec<Value> = parse(&body);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["owner_scope"], "lesson");
        assert_eq!(hits[0]["metadata"]["lesson_id"], "pointers-1");
        assert_eq!(hits[0]["metadata"]["level"], 2);
    }

    #[tokio::test]
    async fn test_api_key_protects_api_but_not_health() {
        let state = test_state(Arc::new(ScriptedCompletion::new("ok"))).await;
        let app = build_router(state, ApiKey::new(Some("secret".to_string())));

        let (status, _) = send(&app, Method::POST, "/api/users?name=Ada", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/users?name=Ada")
            .header(header::AUTHORIZATION, "Bearer secret")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
