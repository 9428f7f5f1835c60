//! Number guessing game state machine.
//!
//! `Active(secret, attempts)` until the owner hits the secret (`Won`) or
//! exhausts the attempt limit (`Lost`, with a smaller participation
//! reward). Non-numeric chat during a game is not an attempt; the dispatch
//! layer drops it silently because the same channel carries unrelated
//! chatter.

use serde::{Deserialize, Serialize};

/// In-flight state of one guessing game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessState {
    pub secret: i64,
    pub attempts: u32,
    pub max_attempts: u32,
}

/// Result of feeding one numeric guess into the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GuessStep {
    /// Secret hit; terminal, the win reward settles.
    Won,
    /// Attempt limit reached; terminal, the participation reward settles
    /// and the secret is revealed.
    Lost { secret: i64 },
    /// Wrong guess with attempts remaining; the hint says which direction
    /// the secret lies.
    Hint {
        higher: bool,
        attempts_remaining: u32,
    },
}

impl GuessState {
    pub fn new(secret: i64, max_attempts: u32) -> Self {
        Self {
            secret,
            attempts: 0,
            max_attempts,
        }
    }

    /// Applies one guess.
    ///
    /// The caller removes the session when the returned step is terminal.
    pub fn guess(&mut self, value: i64) -> GuessStep {
        self.attempts += 1;
        if value == self.secret {
            GuessStep::Won
        } else if self.attempts >= self.max_attempts {
            GuessStep::Lost {
                secret: self.secret,
            }
        } else {
            GuessStep::Hint {
                higher: value < self.secret,
                attempts_remaining: self.max_attempts - self.attempts,
            }
        }
    }

}
