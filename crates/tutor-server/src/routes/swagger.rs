//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    ChatRequest,
    ChatResponse,
    CompleteLessonRequest,
    CreateUserResponse,
    IngestLessonRequest,
    IngestLessonResponse,
    MemoryResponse,
    QuizQuestionResponse,
    QuizResponse,
    QuizSubmission,
    SearchMemoriesRequest,
    UpdateLevelRequest,
    UserProfileResponse,
};
use crate::HealthCheck;

use super::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        // Chat endpoints
        super::chat::chat,
        // User endpoints
        super::users::create_user,
        super::users::get_user,
        super::users::update_level,
        super::users::complete_lesson,
        // Memory endpoints
        super::memory::search_memories,
        // Quiz endpoints
        super::quiz::generate_quiz,
        super::quiz::submit_quiz,
        // Lesson endpoints
        super::lessons::ingest_lesson,
        super::lessons::search_lessons,
    ),
    info(
        title = "Tutor API",
        version = "0.1.0",
        description = "Personalised C programming tutor\n\nAnswers questions with recall of each learner's past exchanges and generates quizzes.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Chat", description = "Chat - Tutoring with personal recall"),
        (name = "Users", description = "Users - Learner profiles and progress"),
        (name = "Memory", description = "Memory - Recall of past exchanges"),
        (name = "Quiz", description = "Quiz - Generation and score submission"),
        (name = "Lessons", description = "Lessons - Shared lesson content"),
    ),
    components(
        schemas(
            HealthCheck,
            ErrorResponse,
            // Chat
            ChatRequest,
            ChatResponse,
            // Users
            CreateUserResponse,
            UserProfileResponse,
            UpdateLevelRequest,
            CompleteLessonRequest,
            // Quiz
            QuizQuestionResponse,
            QuizResponse,
            QuizSubmission,
            // Lessons and memory
            IngestLessonRequest,
            IngestLessonResponse,
            SearchMemoriesRequest,
            MemoryResponse,
        )
    ),
)]
pub struct ApiDoc;
