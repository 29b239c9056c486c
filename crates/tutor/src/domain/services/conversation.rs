//! Conversation Window - Short-term history for one learner
//!
//! A fixed-capacity FIFO of the most recent exchanges. Only insertion order
//! matters, so the oldest exchange is evicted first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One question/answer turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Bounded window of recent exchanges
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    capacity: usize,
    exchanges: VecDeque<Exchange>,
}

impl ConversationWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            exchanges: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an exchange, evicting the oldest one when full
    pub fn push(&mut self, exchange: Exchange) {
        if self.capacity == 0 {
            return;
        }
        while self.exchanges.len() >= self.capacity {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(exchange);
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Exchanges from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// Render as transcript text for the prompt
    pub fn render(&self) -> String {
        self.exchanges
            .iter()
            .map(|e| format!("Student: {}\nTutor: {}", e.question, e.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(n: usize) -> Exchange {
        Exchange {
            question: format!("q{}", n),
            answer: format!("a{}", n),
        }
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut window = ConversationWindow::new(3);
        for n in 0..5 {
            window.push(exchange(n));
        }

        let questions: Vec<_> = window.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["q2", "q3", "q4"]);
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut window = ConversationWindow::new(0);
        window.push(exchange(1));
        assert!(window.is_empty());
        assert_eq!(window.render(), "");
    }

    #[test]
    fn test_render_transcript() {
        let mut window = ConversationWindow::new(2);
        window.push(exchange(1));
        window.push(exchange(2));
        assert_eq!(window.render(), "Student: q1\nTutor: a1\nStudent: q2\nTutor: a2");
    }
}
