//! Quiz question pool port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

/// Quiz difficulty tier. Each tier maps to a reward in
/// [`QuizConfig`](crate::config::QuizConfig).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One quiz question with its expected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

impl QuizQuestion {
    /// Case-insensitive exact match against the expected answer.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.trim().eq_ignore_ascii_case(self.answer.trim())
    }
}

/// An abstract source of quiz questions.
///
/// The returned sequence may be empty; question sampling is the caller's
/// concern so the pool stays a plain data source.
#[async_trait]
pub trait QuestionPool: Send + Sync {
    async fn questions(&self, difficulty: Difficulty) -> Result<Vec<QuizQuestion>>;
}
