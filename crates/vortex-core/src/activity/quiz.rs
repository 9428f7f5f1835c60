//! Quiz state machine.
//!
//! `Active(question, attempts)` until the owner either matches the answer
//! (`Solved`) or burns through the attempt limit (`Exhausted`). Both
//! outcomes are terminal; there is no expiry timer on a quiz.

use serde::{Deserialize, Serialize};

use crate::question::QuizQuestion;

/// In-flight state of one quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizState {
    pub question: QuizQuestion,
    pub attempts: u32,
    pub max_attempts: u32,
}

/// Result of feeding one answer into the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QuizStep {
    /// Correct answer; the session is terminal and the tier reward settles.
    Solved,
    /// Wrong answer with attempts still remaining.
    Wrong { attempts_remaining: u32 },
    /// Attempt limit reached; terminal, no reward, answer revealed.
    Exhausted { answer: String },
}

impl QuizState {
    pub fn new(question: QuizQuestion, max_attempts: u32) -> Self {
        Self {
            question,
            attempts: 0,
            max_attempts,
        }
    }

    /// Applies one answer attempt.
    ///
    /// The caller removes the session when the returned step is terminal.
    pub fn answer(&mut self, text: &str) -> QuizStep {
        if self.question.matches(text) {
            return QuizStep::Solved;
        }
        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            QuizStep::Exhausted {
                answer: self.question.answer.clone(),
            }
        } else {
            QuizStep::Wrong {
                attempts_remaining: self.max_attempts - self.attempts,
            }
        }
    }

}
