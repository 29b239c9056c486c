//! Quiz Parser - Structured questions from free-form model text
//!
//! The model is asked for blocks of the form
//!
//! ```text
//! Q: ...
//! A) ...
//! B) ...
//! C) ...
//! D) ...
//! Correct: B
//! Explanation: ...
//! ---
//! ```
//!
//! Blocks are separated by `---` lines, or by a new `Q:` once a question has
//! already been seen. Any block missing its question, an option, or a usable
//! `Correct:` letter is dropped; parsing itself never fails.

use uuid::Uuid;

use crate::domain::entities::{QuizQuestion, QUIZ_OPTION_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Question,
    Explanation,
}

#[derive(Debug, Default)]
struct Draft {
    question: Option<String>,
    options: [Option<String>; QUIZ_OPTION_COUNT],
    correct: Option<usize>,
    explanation: Option<String>,
    last: Option<Field>,
    /// Set once `Correct:` or `Explanation:` is seen; later `A)` lines are text
    options_closed: bool,
}

impl Draft {
    fn is_blank(&self) -> bool {
        self.question.is_none()
            && self.options.iter().all(Option::is_none)
            && self.correct.is_none()
            && self.explanation.is_none()
    }

    fn finish(self, difficulty: u8) -> Option<QuizQuestion> {
        let question = self.question.filter(|q| !q.is_empty())?;
        let correct_answer = self.correct?;
        let options = self
            .options
            .into_iter()
            .map(|o| o.filter(|o| !o.is_empty()))
            .collect::<Option<Vec<_>>>()?;

        Some(QuizQuestion {
            question_id: Uuid::new_v4().to_string(),
            question,
            options,
            correct_answer,
            explanation: self.explanation.unwrap_or_default(),
            difficulty,
        })
    }
}

fn is_delimiter(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// `A) text` -> (0, "text")
fn option_line(line: &str) -> Option<(usize, &str)> {
    let mut chars = line.chars();
    let letter = chars.next()?;
    if chars.next()? != ')' {
        return None;
    }
    let index = letter_index(letter)?;
    Some((index, line[2..].trim()))
}

fn letter_index(letter: char) -> Option<usize> {
    match letter.to_ascii_uppercase() {
        'A' => Some(0),
        'B' => Some(1),
        'C' => Some(2),
        'D' => Some(3),
        _ => None,
    }
}

/// Parse `Correct:` values such as `B`, `b`, `B)` or `B) pointer arithmetic`
fn correct_index(value: &str) -> Option<usize> {
    let first = value.trim().chars().next()?;
    let index = letter_index(first)?;
    match value.trim().chars().nth(1) {
        None | Some(')') | Some('.') | Some(' ') => Some(index),
        _ => None,
    }
}

/// Parse model output into quiz questions, skipping malformed blocks
pub fn parse_quiz(text: &str, difficulty: u8) -> Vec<QuizQuestion> {
    fn flush(draft: &mut Draft, questions: &mut Vec<QuizQuestion>, difficulty: u8) {
        let done = std::mem::take(draft);
        if done.is_blank() {
            return;
        }
        if let Some(q) = done.finish(difficulty) {
            questions.push(q);
        }
    }

    let mut questions = Vec::new();
    let mut draft = Draft::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if is_delimiter(line) {
            flush(&mut draft, &mut questions, difficulty);
            continue;
        }

        if let Some(rest) = line.strip_prefix("Q:") {
            if draft.question.is_some() {
                flush(&mut draft, &mut questions, difficulty);
            }
            draft.question = Some(rest.trim().to_string());
            draft.last = Some(Field::Question);
        } else if let Some((index, option)) =
            option_line(line).filter(|_| !draft.options_closed)
        {
            draft.options[index] = Some(option.to_string());
            draft.last = None;
        } else if let Some(rest) = line.strip_prefix("Correct:") {
            draft.correct = correct_index(rest);
            draft.last = None;
            draft.options_closed = true;
        } else if let Some(rest) = line.strip_prefix("Explanation:") {
            draft.explanation = Some(rest.trim().to_string());
            draft.last = Some(Field::Explanation);
            draft.options_closed = true;
        } else {
            // Continuation of a multi-line question or explanation
            let target = match draft.last {
                Some(Field::Question) => draft.question.as_mut(),
                Some(Field::Explanation) => draft.explanation.as_mut(),
                None => None,
            };
            if let Some(field) = target {
                field.push('\n');
                field.push_str(line);
            }
        }
    }
    flush(&mut draft, &mut questions, difficulty);

    questions
}
