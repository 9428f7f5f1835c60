//! Cooldown tracker.
//!
//! A per-owner, per-activity-kind timestamp map that gates repeated
//! micro-rewards. Entries never expire on their own; eligibility is checked
//! lazily against `now - window`, so no background sweeping is required.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::ledger::OwnerId;
use crate::session::ActivityKind;

/// Concurrency-safe `(owner, kind) -> last_rewarded_at` map.
#[derive(Clone, Default)]
pub struct CooldownTracker {
    entries: Arc<RwLock<HashMap<(OwnerId, ActivityKind), DateTime<Utc>>>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the owner was rewarded for this kind less than `window`
    /// ago. Owners with no recorded entry are never cooling down.
    pub async fn is_cooling_down(
        &self,
        owner: OwnerId,
        kind: ActivityKind,
        window: Duration,
        now: DateTime<Utc>,
    ) -> bool {
        let entries = self.entries.read().await;
        match entries.get(&(owner, kind)) {
            Some(last) => now - *last < window,
            None => false,
        }
    }

    /// Records `now` as the owner's last reward time for this kind.
    pub async fn mark_rewarded(&self, owner: OwnerId, kind: ActivityKind, now: DateTime<Utc>) {
        let mut entries = self.entries.write().await;
        entries.insert((owner, kind), now);
    }
}
