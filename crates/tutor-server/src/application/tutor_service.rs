//! Tutor Session (Use Case)
//!
//! One tutoring answer per question: recall personal context, add the
//! learner's recent conversation, ask the model, and remember the exchange.
//! Quiz generation is a stateless variant that parses the model's text.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use tutor::domain::METADATA_TYPE;
use tutor::{
    build_quiz_prompt, build_tutor_prompt, parse_quiz, CompletionOptions, CompletionService,
    ConversationWindow, DomainError, Exchange, Interaction, InteractionMetadata, OwnerScope,
    QuizQuestion,
};

use super::InteractionMemory;

/// Metadata `type` value for tutoring exchanges
pub const QA_TYPE: &str = "qa";

const MAX_DIFFICULTY: u8 = 10;
const MAX_QUIZ_QUESTIONS: usize = 20;

/// Tutor session configuration
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Exchanges kept per learner in the conversation window
    pub history_window: usize,
    /// Learners with a live window; the least recently active one is
    /// dropped to make room. 0 means no limit.
    pub max_conversations: usize,
    /// Past interactions pulled into each prompt
    pub context_limit: usize,
    /// Sampling temperature passed to the model
    pub temperature: f32,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            max_conversations: 10_000,
            context_limit: 5,
            temperature: 0.7,
        }
    }
}

struct Conversation {
    window: ConversationWindow,
    last_used: u64,
}

/// Per-learner conversation windows, bounded in count
#[derive(Default)]
struct Conversations {
    tick: u64,
    by_user: HashMap<String, Conversation>,
}

impl Conversations {
    fn window(&self, user_id: &str) -> Option<&ConversationWindow> {
        self.by_user.get(user_id).map(|c| &c.window)
    }

    fn push(
        &mut self,
        user_id: &str,
        exchange: Exchange,
        capacity: usize,
        max_conversations: usize,
    ) {
        self.tick += 1;

        if max_conversations > 0 && !self.by_user.contains_key(user_id) {
            while self.by_user.len() >= max_conversations {
                let Some(oldest) = self
                    .by_user
                    .iter()
                    .min_by_key(|(_, c)| c.last_used)
                    .map(|(id, _)| id.clone())
                else {
                    break;
                };
                self.by_user.remove(&oldest);
                tracing::debug!("Dropped conversation window of {}", oldest);
            }
        }

        let tick = self.tick;
        let conversation = self
            .by_user
            .entry(user_id.to_string())
            .or_insert_with(|| Conversation {
                window: ConversationWindow::new(capacity),
                last_used: tick,
            });
        conversation.last_used = tick;
        conversation.window.push(exchange);
    }
}

/// Tutoring use cases over the memory store and completion service
pub struct TutorService {
    memory: Arc<InteractionMemory>,
    completion: Arc<dyn CompletionService>,
    conversations: RwLock<Conversations>,
    config: TutorConfig,
}

impl TutorService {
    pub fn new(
        memory: Arc<InteractionMemory>,
        completion: Arc<dyn CompletionService>,
        config: TutorConfig,
    ) -> Self {
        Self {
            memory,
            completion,
            conversations: RwLock::new(Conversations::default()),
            config,
        }
    }

    fn options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(self.config.temperature),
            ..Default::default()
        }
    }

    /// Answer a learner's question.
    ///
    /// `extra_context` is caller-supplied text appended to the recalled context.
    /// The exchange is only added to the conversation window once it has been
    /// recorded; a failed write fails the whole call.
    pub async fn answer(
        &self,
        user_id: &str,
        question: &str,
        user_level: i32,
        extra_context: Option<&str>,
    ) -> Result<String, DomainError> {
        let user_id = user_id.trim();
        let question = question.trim();
        if user_id.is_empty() {
            return Err(DomainError::Validation("user_id must not be empty".to_string()));
        }
        if question.is_empty() {
            return Err(DomainError::Validation("message must not be empty".to_string()));
        }

        let scope = OwnerScope::user(user_id);

        // 1. Recall
        let mut context = self
            .memory
            .retrieve(&scope, question, self.config.context_limit)
            .await?;
        if let Some(extra) = extra_context.map(str::trim).filter(|c| !c.is_empty()) {
            context.push(extra.to_string());
        }

        // 2. Prompt
        let history = self
            .conversations
            .read()
            .await
            .window(user_id)
            .map(ConversationWindow::render)
            .unwrap_or_default();
        let prompt = build_tutor_prompt(user_level, &context, &history, question);

        // 3. Generate
        let completion = self.completion.complete(&prompt, &self.options()).await?;
        let response = completion.content;

        tracing::info!(
            "Answered user {} via {} ({} context items)",
            user_id,
            completion.model,
            context.len()
        );

        // 4. Remember
        let mut metadata = InteractionMetadata::new();
        metadata.insert(METADATA_TYPE.to_string(), QA_TYPE.into());
        metadata.insert("level".to_string(), user_level.into());

        if let Err(e) = self
            .memory
            .record(scope, Interaction::format_exchange(question, &response), metadata)
            .await
        {
            tracing::error!(
                "Response generated for user {} but the exchange was not recorded: {}",
                user_id,
                e
            );
            return Err(e);
        }

        // 5. Short-term history
        self.conversations.write().await.push(
            user_id,
            Exchange {
                question: question.to_string(),
                answer: response.clone(),
            },
            self.config.history_window,
            self.config.max_conversations,
        );

        Ok(response)
    }

    /// Recent exchanges for a learner, oldest first
    pub async fn history(&self, user_id: &str) -> Vec<Exchange> {
        self.conversations
            .read()
            .await
            .window(user_id)
            .map(|w| w.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Generate a multiple-choice quiz. Malformed blocks in the model
    /// output are dropped, so fewer questions than requested may come back.
    pub async fn generate_quiz(
        &self,
        topic: &str,
        difficulty: u8,
        num_questions: usize,
    ) -> Result<Vec<QuizQuestion>, DomainError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DomainError::Validation("topic must not be empty".to_string()));
        }
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(DomainError::Validation(format!(
                "difficulty must be between 1 and {}, got {}",
                MAX_DIFFICULTY, difficulty
            )));
        }
        if !(1..=MAX_QUIZ_QUESTIONS).contains(&num_questions) {
            return Err(DomainError::Validation(format!(
                "num_questions must be between 1 and {}, got {}",
                MAX_QUIZ_QUESTIONS, num_questions
            )));
        }

        let prompt = build_quiz_prompt(topic, difficulty, num_questions);
        let completion = self.completion.complete(&prompt, &self.options()).await?;
        let quiz = parse_quiz(&completion.content, difficulty);

        if quiz.len() < num_questions {
            tracing::warn!(
                "Quiz on {}: parsed {} of {} requested questions",
                topic,
                quiz.len(),
                num_questions
            );
        }

        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryInteractionRepository;
    use crate::testing::{FailingCompletion, HashEmbedder, ReadOnlyRepository, ScriptedCompletion};

    fn service_with(
        completion: Arc<dyn CompletionService>,
        config: TutorConfig,
    ) -> (TutorService, Arc<InteractionMemory>) {
        let memory = Arc::new(InteractionMemory::new(
            Arc::new(InMemoryInteractionRepository::new()),
            Arc::new(HashEmbedder),
        ));
        (TutorService::new(memory.clone(), completion, config), memory)
    }

    #[tokio::test]
    async fn test_answer_records_exchange_and_history() {
        let completion = Arc::new(ScriptedCompletion::new("A pointer holds an address."));
        let (service, memory) = service_with(completion.clone(), TutorConfig::default());

        let response = service.answer("u1", "Explain pointers", 2, None).await.unwrap();
        assert_eq!(response, "A pointer holds an address.");

        let recalled = memory
            .retrieve_scored(&OwnerScope::user("u1"), "pointers", 5)
            .await
            .unwrap();
        assert_eq!(recalled.len(), 1);
        let stored = &recalled[0].interaction;
        assert_eq!(stored.text, "Q: Explain pointers\nA: A pointer holds an address.");
        assert_eq!(stored.metadata["type"].as_str(), Some("qa"));
        assert_eq!(stored.metadata["level"].as_i64(), Some(2));

        let history = service.history("u1").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].question, "Explain pointers");
    }

    #[tokio::test]
    async fn test_second_answer_sees_context_and_history() {
        let completion = Arc::new(ScriptedCompletion::new("Because arrays decay to pointers."));
        let (service, _memory) = service_with(completion.clone(), TutorConfig::default());

        service.answer("u1", "Explain pointers", 1, None).await.unwrap();
        service
            .answer("u1", "Why do pointers and arrays look alike?", 1, Some("Chapter 5"))
            .await
            .unwrap();

        let prompts = completion.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Conversation History: \n"));
        assert!(prompts[1].contains("Previous Context: Q: Explain pointers"));
        assert!(prompts[1].contains("Chapter 5"));
        assert!(prompts[1].contains("Student: Explain pointers\nTutor: Because arrays decay"));
        assert!(prompts[1].contains("Student Level: 1"));
    }

    #[tokio::test]
    async fn test_history_is_per_user_and_bounded() {
        let completion = Arc::new(ScriptedCompletion::new("ok"));
        let config = TutorConfig {
            history_window: 2,
            ..Default::default()
        };
        let (service, _memory) = service_with(completion.clone(), config);

        for n in 0..3 {
            service.answer("a", &format!("question {n}"), 1, None).await.unwrap();
        }
        service.answer("b", "hello", 1, None).await.unwrap();

        let history: Vec<_> = service
            .history("a")
            .await
            .into_iter()
            .map(|e| e.question)
            .collect();
        assert_eq!(history, vec!["question 1", "question 2"]);
        assert_eq!(service.history("b").await.len(), 1);

        let last_prompt = completion.prompts().pop().unwrap();
        assert!(!last_prompt.contains("question 0"));
        assert!(last_prompt.contains("Previous Context: \n"));
    }

    #[tokio::test]
    async fn test_least_recent_conversation_dropped_at_limit() {
        let config = TutorConfig {
            max_conversations: 2,
            ..Default::default()
        };
        let (service, _memory) = service_with(Arc::new(ScriptedCompletion::new("ok")), config);

        service.answer("a", "first", 1, None).await.unwrap();
        service.answer("b", "first", 1, None).await.unwrap();
        service.answer("a", "second", 1, None).await.unwrap();
        service.answer("c", "first", 1, None).await.unwrap();

        assert_eq!(service.history("a").await.len(), 2);
        assert!(service.history("b").await.is_empty());
        assert_eq!(service.history("c").await.len(), 1);
    }

    #[tokio::test]
    async fn test_completion_failure_leaves_no_state() {
        let (service, memory) = service_with(Arc::new(FailingCompletion), TutorConfig::default());

        let err = service.answer("u1", "Explain pointers", 1, None).await.unwrap_err();
        assert!(matches!(err, DomainError::ExternalService(_)));
        assert!(service.history("u1").await.is_empty());
        assert!(memory
            .retrieve(&OwnerScope::user("u1"), "pointers", 5)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_record_failure_fails_answer_and_skips_history() {
        let memory = Arc::new(InteractionMemory::new(
            Arc::new(ReadOnlyRepository::default()),
            Arc::new(HashEmbedder),
        ));
        let service = TutorService::new(
            memory,
            Arc::new(ScriptedCompletion::new("generated")),
            TutorConfig::default(),
        );

        let err = service.answer("u1", "Explain pointers", 1, None).await.unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
        assert!(service.history("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let (service, _memory) = service_with(
            Arc::new(ScriptedCompletion::new("ok")),
            TutorConfig::default(),
        );
        assert!(matches!(
            service.answer("u1", "   ", 1, None).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_quiz_parses_and_skips_malformed() {
        let text = "Q: What is a pointer?\nA) x\nB) y\nC) z\nD) w\nCorrect: B\nExplanation: Addresses.\n---\nQ: Broken\nA) x\n---";
        let completion = Arc::new(ScriptedCompletion::new(text));
        let (service, _memory) = service_with(completion.clone(), TutorConfig::default());

        let quiz = service.generate_quiz("pointers", 6, 2).await.unwrap();

        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].correct_answer, 1);
        assert_eq!(quiz[0].difficulty, 6);
        assert!(completion.prompts()[0].contains("Generate 2 multiple choice questions about pointers"));
    }

    #[tokio::test]
    async fn test_generate_quiz_validates_parameters() {
        let (service, _memory) = service_with(
            Arc::new(ScriptedCompletion::new("")),
            TutorConfig::default(),
        );
        assert!(service.generate_quiz("pointers", 0, 5).await.is_err());
        assert!(service.generate_quiz("pointers", 11, 5).await.is_err());
        assert!(service.generate_quiz("pointers", 5, 0).await.is_err());
        assert!(service.generate_quiz(" ", 5, 5).await.is_err());
        assert!(service.generate_quiz("pointers", 5, 5).await.unwrap().is_empty());
    }
}
