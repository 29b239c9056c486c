//! QuizQuestion - A parsed multiple-choice question

use serde::{Deserialize, Serialize};

/// Number of options every quiz question carries (A to D)
pub const QUIZ_OPTION_COUNT: usize = 4;

/// One multiple-choice question produced from model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: u8,
}
