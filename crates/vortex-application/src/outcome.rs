//! Command outcome values.
//!
//! Every engine entry point returns one of these (never a bare side
//! effect) so the transport layer can render the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vortex_core::Coins;
use vortex_core::question::Difficulty;
use vortex_core::window::WindowId;

/// A quiz was started for the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStarted {
    pub question: String,
    pub difficulty: Difficulty,
    pub reward: Coins,
}

/// Result of one quiz answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct { reward: Coins },
    Incorrect { attempts_remaining: u32 },
    Exhausted { answer: String },
}

/// A mining run was started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningStarted {
    pub run_secs: u64,
    pub settles_at: DateTime<Utc>,
}

/// A guessing game was started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameStarted {
    pub secret_min: i64,
    pub secret_max: i64,
    pub max_attempts: u32,
}

/// Result of one numeric guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessOutcome {
    Won {
        reward: Coins,
    },
    Lost {
        secret: i64,
        reward: Coins,
    },
    Hint {
        higher: bool,
        attempts_remaining: u32,
    },
}

/// A governance proposal window was opened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProposalOpened {
    pub window_id: WindowId,
    pub closes_at: DateTime<Utc>,
}

/// Result of one governance vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VoteOutcome {
    /// Vote counted with the voter's balance at vote time as its weight.
    Recorded { weight: Coins },
    /// The first vote was binding; this one changed nothing.
    AlreadyVoted,
}

/// An airdrop window was opened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirdropOpened {
    pub window_id: WindowId,
    pub pool: Coins,
    pub closes_at: DateTime<Utc>,
}

/// Result of an airdrop participation reaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirdropJoined {
    pub window_id: WindowId,
    /// False when the owner had already joined (idempotent no-op).
    pub newly_joined: bool,
}
