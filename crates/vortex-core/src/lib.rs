//! Vortex core domain layer.
//!
//! Session registry, per-activity state machines, cooldown tracking, the
//! window collector, and the settlement engine. External collaborators
//! (the balance ledger, the question pool) are reached through ports so
//! the core stays independent of any transport or storage backend.

pub mod activity;
pub mod coins;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod ledger;
pub mod question;
pub mod random;
pub mod session;
pub mod settlement;
pub mod window;

// Re-export common types
pub use coins::Coins;
pub use error::{Result, VortexError};
pub use ledger::{LedgerPort, OwnerId};
