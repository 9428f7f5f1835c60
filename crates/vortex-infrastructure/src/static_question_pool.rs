//! Static question pool implementation.
//!
//! A `QuestionPool` backed by an in-memory list, optionally loaded from a
//! TOML file at startup.

use async_trait::async_trait;
use serde::Deserialize;

use vortex_core::error::{Result, VortexError};
use vortex_core::question::{Difficulty, QuestionPool, QuizQuestion};

#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(rename = "question", default)]
    questions: Vec<QuizQuestion>,
}

/// `QuestionPool` serving a fixed list of questions.
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionPool {
    questions: Vec<QuizQuestion>,
}

impl StaticQuestionPool {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    /// Parses a pool from a TOML document of `[[question]]` tables.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: QuestionFile =
            toml::from_str(text).map_err(|e| VortexError::config(e.to_string()))?;
        Ok(Self::new(file.questions))
    }

    /// Loads a pool from a TOML file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            VortexError::dependency("question_pool", format!("read {:?}: {e}", path.as_ref()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[async_trait]
impl QuestionPool for StaticQuestionPool {
    async fn questions(&self, difficulty: Difficulty) -> Result<Vec<QuizQuestion>> {
        Ok(self
            .questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .cloned()
            .collect())
    }
}
