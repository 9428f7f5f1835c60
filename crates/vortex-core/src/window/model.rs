//! Window domain model.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::coins::Coins;
use crate::ledger::OwnerId;

/// Identifier of one window, monotonically assigned and unique within the
/// process lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of stakeholder input a window collects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WindowKind {
    Airdrop,
    Proposal,
}

/// Direction of a governance vote.
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
pub enum VotePolarity {
    For,
    Against,
}

/// Kind-specific window state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowState {
    /// Participation by presence; the pool splits evenly at close.
    Airdrop {
        pool: Coins,
        participants: BTreeSet<OwnerId>,
    },
    /// Weighted voting; the first vote per owner is binding.
    Proposal {
        text: String,
        creator: OwnerId,
        voters: BTreeSet<OwnerId>,
        for_weight: Coins,
        against_weight: Coins,
    },
}

/// A time-bounded collection of stakeholder input, settled exactly once at
/// closure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    pub state: WindowState,
}

impl Window {
    pub fn new(
        id: WindowId,
        opens_at: DateTime<Utc>,
        duration: Duration,
        state: WindowState,
    ) -> Self {
        Self {
            id,
            opens_at,
            closes_at: opens_at + duration,
            state,
        }
    }

    pub fn kind(&self) -> WindowKind {
        match self.state {
            WindowState::Airdrop { .. } => WindowKind::Airdrop,
            WindowState::Proposal { .. } => WindowKind::Proposal,
        }
    }

    /// Computes the terminal settlement for this window.
    ///
    /// Pure computation; crediting participants is the settlement engine's
    /// job. Consumes the window: settlement happens once, after which the
    /// window is terminal and discarded.
    pub fn settle(self) -> WindowSettlement {
        match self.state {
            WindowState::Airdrop { pool, participants } => {
                let count = participants.len() as u64;
                let per_participant = pool.split_among(count);
                // The floor-division remainder is retained, not
                // distributed. Accepted rounding loss, not an error.
                let retained = pool.split_remainder(count);
                WindowSettlement::Airdrop {
                    window_id: self.id,
                    pool,
                    per_participant,
                    retained,
                    participants: participants.into_iter().collect(),
                }
            }
            WindowState::Proposal {
                text,
                creator,
                voters,
                for_weight,
                against_weight,
            } => WindowSettlement::Proposal {
                window_id: self.id,
                text,
                creator,
                voter_count: voters.len(),
                for_weight,
                against_weight,
            },
        }
    }
}

/// Terminal result of closing a window.
///
/// Proposal closure only reports the tally; executing a passed proposal is
/// out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowSettlement {
    Airdrop {
        window_id: WindowId,
        pool: Coins,
        per_participant: Coins,
        retained: Coins,
        participants: Vec<OwnerId>,
    },
    Proposal {
        window_id: WindowId,
        text: String,
        creator: OwnerId,
        voter_count: usize,
        for_weight: Coins,
        against_weight: Coins,
    },
}
