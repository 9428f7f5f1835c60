//! In-memory ledger implementation.
//!
//! A reference `LedgerPort` adapter for tests and single-process
//! deployments. Balances live in a keyed map; the daily-earnings counter
//! resets lazily when a credit or read observes a new calendar day. This is
//! not a persistence solution.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use vortex_core::error::Result;
use vortex_core::ledger::{LedgerPort, OwnerId};
use vortex_core::Coins;

#[derive(Debug, Clone, Copy, Default)]
struct DailyCounter {
    date: Option<NaiveDate>,
    earned: Coins,
}

/// `LedgerPort` backed by in-process maps.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    balances: Arc<RwLock<HashMap<OwnerId, Coins>>>,
    daily: Arc<RwLock<HashMap<OwnerId, DailyCounter>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits the owner, attributing the earnings to `date`.
    ///
    /// The trait implementation calls this with today's date; tests use it
    /// directly to exercise the calendar-day reset.
    pub async fn credit_on(&self, owner: OwnerId, amount: Coins, date: NaiveDate) {
        {
            let mut balances = self.balances.write().await;
            *balances.entry(owner).or_default() += amount;
        }
        let mut daily = self.daily.write().await;
        let counter = daily.entry(owner).or_default();
        if counter.date != Some(date) {
            counter.date = Some(date);
            counter.earned = Coins::ZERO;
        }
        counter.earned += amount;
        debug!(%owner, %amount, earned_today = %counter.earned, "ledger credit");
    }

    /// Earnings attributed to `date`; zero for any other day.
    pub async fn daily_earnings_on(&self, owner: OwnerId, date: NaiveDate) -> Coins {
        let daily = self.daily.read().await;
        match daily.get(&owner) {
            Some(counter) if counter.date == Some(date) => counter.earned,
            _ => Coins::ZERO,
        }
    }
}

#[async_trait]
impl LedgerPort for MemoryLedger {
    async fn balance(&self, owner: OwnerId) -> Result<Coins> {
        let balances = self.balances.read().await;
        Ok(balances.get(&owner).copied().unwrap_or_default())
    }

    async fn credit(&self, owner: OwnerId, amount: Coins) -> Result<()> {
        self.credit_on(owner, amount, Utc::now().date_naive()).await;
        Ok(())
    }

    async fn daily_earnings(&self, owner: OwnerId) -> Result<Coins> {
        Ok(self
            .daily_earnings_on(owner, Utc::now().date_naive())
            .await)
    }
}
