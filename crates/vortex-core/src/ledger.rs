//! Reward ledger port.
//!
//! The durable per-owner coin balance and daily-earnings counter live in an
//! external store. This trait decouples the engine from that store; the
//! engine issues one read (cap or weight check) and one write (credit) per
//! settlement and never retries a failed call itself.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::coins::Coins;
use crate::error::Result;

/// Opaque identifier of one participant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OwnerId {
    fn from(id: u64) -> Self {
        OwnerId(id)
    }
}

/// An abstract port to the balance ledger.
///
/// Implementations own durability, the calendar-day reset of the earnings
/// counter, and any atomicity stronger than read-then-write. The engine
/// treats `daily_earnings` as advisory read-through state: the cap check and
/// the subsequent credit are two calls, and the resulting race window is an
/// accepted, bounded-impact limitation of this design.
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Current balance of the owner. Missing owners read as zero.
    async fn balance(&self, owner: OwnerId) -> Result<Coins>;

    /// Credits the owner. Assumed eventually durable; no return value.
    async fn credit(&self, owner: OwnerId, amount: Coins) -> Result<()>;

    /// Coins the owner accrued today. Resets on a calendar-day boundary,
    /// managed entirely by the implementation.
    async fn daily_earnings(&self, owner: OwnerId) -> Result<Coins>;
}
