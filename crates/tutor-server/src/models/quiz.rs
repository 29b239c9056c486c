//! Quiz - Generated questions and score submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use tutor::QuizQuestion;

fn default_difficulty() -> u8 {
    5
}

fn default_num_questions() -> usize {
    5
}

/// Query for `POST /api/quiz/{topic}`
#[derive(Debug, Deserialize, IntoParams)]
pub struct QuizQuery {
    /// Difficulty from 1 to 10
    #[serde(default = "default_difficulty")]
    #[param(default = 5, minimum = 1, maximum = 10)]
    pub difficulty: u8,
    #[serde(default = "default_num_questions")]
    #[param(default = 5, minimum = 1, maximum = 20)]
    pub num_questions: usize,
}

/// A multiple-choice question
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizQuestionResponse {
    pub question_id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: u8,
}

impl From<QuizQuestion> for QuizQuestionResponse {
    fn from(q: QuizQuestion) -> Self {
        Self {
            question_id: q.question_id,
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
            difficulty: q.difficulty,
        }
    }
}

/// Generated quiz
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    pub quiz: Vec<QuizQuestionResponse>,
}

/// Quiz result submitted by the frontend
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizSubmission {
    pub user_id: String,
    pub topic: String,
    /// Score in percent (0-100)
    pub score: f64,
    /// When the quiz was taken, as reported by the client
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}
