//! Prompt templates for the tutor persona and quiz generation

/// Build the tutoring prompt sent to the completion service
pub fn build_tutor_prompt(user_level: i32, context: &[String], history: &str, question: &str) -> String {
    format!(
        r#"You are an expert C programming tutor. You're patient, encouraging, and adapt your teaching style to the student's level.

Student Level: {user_level}
Previous Context: {context}
Conversation History: {history}

Student Question: {question}

Guidelines:
- Provide clear, step-by-step explanations
- Use appropriate examples for the student's level
- Encourage questions and experimentation
- Point out common mistakes and how to avoid them
- If the student seems stuck, break down the problem into smaller parts

Response:"#,
        context = context.join("\n"),
    )
}

/// Build the quiz generation prompt. The output format here is what
/// [`crate::domain::parse_quiz`] expects back.
pub fn build_quiz_prompt(topic: &str, difficulty: u8, num_questions: usize) -> String {
    format!(
        r#"Generate {num_questions} multiple choice questions about {topic} in C programming.
Difficulty level: {difficulty}/10

Format each question as:
Q: [question]
A) [option 1]
B) [option 2]
C) [option 3]
D) [option 4]
Correct: [A/B/C/D]
Explanation: [brief explanation]

---"#
    )
}
