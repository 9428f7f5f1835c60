//! Per-activity state machines.
//!
//! Each activity is a small state machine driven by owner input events and,
//! for mining, a single expiry timer. The machines are pure state: session
//! bookkeeping lives in [`crate::session`], reward math in
//! [`crate::settlement`].

mod guess;
mod mining;
mod quiz;

pub use guess::{GuessState, GuessStep};
pub use mining::MiningState;
pub use quiz::{QuizState, QuizStep};
