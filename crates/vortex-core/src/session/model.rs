//! Session domain model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::activity::{GuessState, MiningState, QuizState};
use crate::ledger::OwnerId;

/// The kind of activity a session or cooldown belongs to.
///
/// `Farming` never owns a session; it appears here because the cooldown
/// tracker is keyed by `(owner, kind)` and the farming message path uses it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityKind {
    Quiz,
    Mining,
    GuessingGame,
    Farming,
}

/// Kind-specific session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionPayload {
    Quiz(QuizState),
    Mining(MiningState),
    Guess(GuessState),
}

impl SessionPayload {
    pub fn kind(&self) -> ActivityKind {
        match self {
            SessionPayload::Quiz(_) => ActivityKind::Quiz,
            SessionPayload::Mining(_) => ActivityKind::Mining,
            SessionPayload::Guess(_) => ActivityKind::GuessingGame,
        }
    }
}

/// One active timed or attempt-limited activity for one owner.
///
/// At most one session exists per `(owner, kind)` at any time; the registry
/// enforces this at creation. A session ends on success, on exhausting
/// attempts, or on timer expiry, whichever a mutation observes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub owner: OwnerId,
    pub payload: SessionPayload,
    pub created_at: DateTime<Utc>,
    /// Set only for kinds with a fixed-duration timer (mining).
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session, deriving `expires_at` from the optional TTL.
    pub fn new(
        owner: OwnerId,
        payload: SessionPayload,
        created_at: DateTime<Utc>,
        ttl: Option<Duration>,
    ) -> Self {
        let expires_at = ttl.map(|ttl| created_at + ttl);
        Self {
            owner,
            payload,
            created_at,
            expires_at,
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.payload.kind()
    }
}
