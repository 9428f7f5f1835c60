//! Outbound engine notifications.

use serde::{Deserialize, Serialize};

use vortex_core::Coins;
use vortex_core::ledger::OwnerId;
use vortex_core::window::WindowId;

/// A notification the transport layer should render for its users.
///
/// Synchronous dispatch (`handle_message`, `handle_reaction`) returns these
/// directly; timer-driven settlements (mining completion, window closure)
/// deliver them over the engine's event channel instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    QuizSolved {
        owner: OwnerId,
        reward: Coins,
    },
    QuizWrong {
        owner: OwnerId,
        attempts_remaining: u32,
    },
    QuizExhausted {
        owner: OwnerId,
        answer: String,
    },
    GuessCorrect {
        owner: OwnerId,
        reward: Coins,
    },
    GuessLost {
        owner: OwnerId,
        secret: i64,
        reward: Coins,
    },
    GuessHint {
        owner: OwnerId,
        higher: bool,
        attempts_remaining: u32,
    },
    FarmingRewarded {
        owner: OwnerId,
        reward: Coins,
    },
    /// Distinct from the base farming reward so the transport can announce
    /// the bonus separately.
    FarmingBonus {
        owner: OwnerId,
        bonus: Coins,
    },
    ReactionRewarded {
        owner: OwnerId,
        reward: Coins,
    },
    MiningComplete {
        owner: OwnerId,
        base: Coins,
        bonus: Coins,
        total: Coins,
    },
    AirdropSettled {
        window_id: WindowId,
        per_participant: Coins,
        recipients: Vec<OwnerId>,
    },
    /// The window closed with nobody participating; nothing was credited.
    AirdropExpiredEmpty {
        window_id: WindowId,
    },
    /// Closure only reports the tally; executing the outcome is out of
    /// scope.
    ProposalClosed {
        window_id: WindowId,
        for_weight: Coins,
        against_weight: Coins,
        voter_count: usize,
    },
}
