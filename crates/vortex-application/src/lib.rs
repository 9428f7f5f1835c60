//! Vortex application layer.
//!
//! The [`VortexEngine`] facade wires the core components together and
//! exposes one entry point per user-facing command. The transport layer
//! (chat delivery, command parsing, message rendering) sits above this
//! crate and renders the outcome values and [`EngineEvent`] notifications.

mod engine;
mod event;
mod outcome;

pub use engine::{
    AIRDROP_EMOJI, VOTE_AGAINST_EMOJI, VOTE_FOR_EMOJI, VortexEngine,
};
pub use event::EngineEvent;
pub use outcome::{
    AirdropJoined, AirdropOpened, AnswerOutcome, GameStarted, GuessOutcome, MiningStarted,
    ProposalOpened, QuizStarted, VoteOutcome,
};
