//! Window collector.
//!
//! Generic two-phase engine shared by airdrops and governance proposals:
//! open a collection window, accumulate stakeholder input, settle once at
//! the deadline. Closed windows are removed atomically, so a close racing
//! a late input has the same first-writer-wins tie-break as the session
//! registry.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::coins::Coins;
use crate::error::{Result, VortexError};
use crate::ledger::OwnerId;
use crate::window::model::{VotePolarity, Window, WindowId, WindowKind, WindowState};

/// Concurrency-safe table of open windows with monotone id assignment.
#[derive(Clone, Default)]
pub struct WindowCollector {
    windows: Arc<RwLock<HashMap<WindowId, Window>>>,
    next_id: Arc<AtomicU64>,
}

impl WindowCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_id(&self) -> WindowId {
        WindowId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Opens an airdrop window distributing `pool` at closure.
    pub async fn open_airdrop(
        &self,
        pool: Coins,
        now: DateTime<Utc>,
        duration: Duration,
    ) -> Window {
        let window = Window::new(
            self.assign_id(),
            now,
            duration,
            WindowState::Airdrop {
                pool,
                participants: BTreeSet::new(),
            },
        );
        self.insert(window).await
    }

    /// Opens a governance proposal window.
    ///
    /// The creator's balance threshold is checked by the caller before this
    /// point; the collector only owns window bookkeeping.
    pub async fn open_proposal(
        &self,
        text: String,
        creator: OwnerId,
        now: DateTime<Utc>,
        duration: Duration,
    ) -> Window {
        let window = Window::new(
            self.assign_id(),
            now,
            duration,
            WindowState::Proposal {
                text,
                creator,
                voters: BTreeSet::new(),
                for_weight: Coins::ZERO,
                against_weight: Coins::ZERO,
            },
        );
        self.insert(window).await
    }

    async fn insert(&self, window: Window) -> Window {
        let mut windows = self.windows.write().await;
        windows.insert(window.id, window.clone());
        window
    }

    /// Adds `owner` to an airdrop's participant set.
    ///
    /// Returns `Ok(true)` when newly added, `Ok(false)` for a duplicate
    /// (idempotent no-op).
    ///
    /// # Errors
    ///
    /// `NotFound` if the window does not exist or is not an airdrop.
    pub async fn record_participation(&self, id: WindowId, owner: OwnerId) -> Result<bool> {
        let mut windows = self.windows.write().await;
        match windows.get_mut(&id).map(|w| &mut w.state) {
            Some(WindowState::Airdrop { participants, .. }) => Ok(participants.insert(owner)),
            _ => Err(VortexError::not_found("airdrop", id)),
        }
    }

    /// Records a weighted vote on a proposal.
    ///
    /// The first vote per owner is binding: a repeat vote (either polarity)
    /// returns `Ok(false)` and leaves the tally unchanged. `weight` is the
    /// voter's balance read at vote time, passed in by the caller.
    ///
    /// # Errors
    ///
    /// `NotFound` if the window does not exist or is not a proposal.
    pub async fn record_vote(
        &self,
        id: WindowId,
        owner: OwnerId,
        polarity: VotePolarity,
        weight: Coins,
    ) -> Result<bool> {
        let mut windows = self.windows.write().await;
        match windows.get_mut(&id).map(|w| &mut w.state) {
            Some(WindowState::Proposal {
                voters,
                for_weight,
                against_weight,
                ..
            }) => {
                if !voters.insert(owner) {
                    return Ok(false);
                }
                match polarity {
                    VotePolarity::For => *for_weight = for_weight.saturating_add(weight),
                    VotePolarity::Against => {
                        *against_weight = against_weight.saturating_add(weight)
                    }
                }
                Ok(true)
            }
            _ => Err(VortexError::not_found("proposal", id)),
        }
    }

    /// The most recently opened window of `kind` still collecting input.
    pub async fn latest_open(&self, kind: WindowKind) -> Option<WindowId> {
        let windows = self.windows.read().await;
        windows
            .values()
            .filter(|w| w.kind() == kind)
            .map(|w| w.id)
            .max()
    }

    /// Atomically removes and returns the window for settlement.
    ///
    /// Exactly one caller receives the window; a timer firing after the
    /// window was already taken observes `None` and settles nothing.
    pub async fn take(&self, id: WindowId) -> Option<Window> {
        self.windows.write().await.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_monotone_and_unique() {
        let collector = WindowCollector::new();
        let now = Utc::now();
        let a = collector
            .open_airdrop(Coins::new(100), now, Duration::minutes(5))
            .await;
        let b = collector
            .open_proposal("text".to_string(), OwnerId(1), now, Duration::hours(24))
            .await;
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_participation_is_idempotent() {
        let collector = WindowCollector::new();
        let window = collector
            .open_airdrop(Coins::new(100), Utc::now(), Duration::minutes(5))
            .await;

        assert!(
            collector
                .record_participation(window.id, OwnerId(1))
                .await
                .unwrap()
        );
        assert!(
            !collector
                .record_participation(window.id, OwnerId(1))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_first_vote_is_binding() {
        let collector = WindowCollector::new();
        let window = collector
            .open_proposal("text".to_string(), OwnerId(1), Utc::now(), Duration::hours(1))
            .await;

        assert!(
            collector
                .record_vote(window.id, OwnerId(2), VotePolarity::For, Coins::new(40))
                .await
                .unwrap()
        );
        // Neither a repeat nor a flipped vote changes the tally.
        assert!(
            !collector
                .record_vote(window.id, OwnerId(2), VotePolarity::For, Coins::new(40))
                .await
                .unwrap()
        );
        assert!(
            !collector
                .record_vote(window.id, OwnerId(2), VotePolarity::Against, Coins::new(40))
                .await
                .unwrap()
        );

        let window = collector.take(window.id).await.unwrap();
        match window.state {
            WindowState::Proposal {
                for_weight,
                against_weight,
                ..
            } => {
                assert_eq!(for_weight, Coins::new(40));
                assert_eq!(against_weight, Coins::ZERO);
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vote_on_airdrop_is_not_found() {
        let collector = WindowCollector::new();
        let window = collector
            .open_airdrop(Coins::new(100), Utc::now(), Duration::minutes(5))
            .await;
        let err = collector
            .record_vote(window.id, OwnerId(1), VotePolarity::For, Coins::new(1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_take_settles_exactly_once() {
        let collector = WindowCollector::new();
        let window = collector
            .open_airdrop(Coins::new(100), Utc::now(), Duration::minutes(5))
            .await;
        assert!(collector.take(window.id).await.is_some());
        assert!(collector.take(window.id).await.is_none());
        // Input after closure is NotFound; the window is never reopened.
        let err = collector
            .record_participation(window.id, OwnerId(1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_latest_open_filters_by_kind() {
        let collector = WindowCollector::new();
        let now = Utc::now();
        let first = collector
            .open_airdrop(Coins::new(10), now, Duration::minutes(5))
            .await;
        collector
            .open_proposal("text".to_string(), OwnerId(1), now, Duration::hours(1))
            .await;
        let second = collector
            .open_airdrop(Coins::new(20), now, Duration::minutes(5))
            .await;

        assert_eq!(
            collector.latest_open(WindowKind::Airdrop).await,
            Some(second.id)
        );
        collector.take(second.id).await;
        assert_eq!(
            collector.latest_open(WindowKind::Airdrop).await,
            Some(first.id)
        );
    }
}
