//! Session registry.
//!
//! Owns the keyed map of active sessions and enforces the one-session-per-
//! `(owner, kind)` invariant. All mutation goes through this registry so
//! the terminal race between a success event and a timer firing has a
//! single tie-break: whichever path takes the entry first performs the
//! settlement, the other observes absence and becomes a silent no-op.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::error::{Result, VortexError};
use crate::ledger::OwnerId;
use crate::session::model::{ActivityKind, Session, SessionPayload};

/// Concurrency-safe container of at most one active session per
/// `(owner, kind)`.
///
/// Cloning the registry is cheap and shares the underlying map, so the
/// engine hands clones to its timer tasks.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<(OwnerId, ActivityKind), Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session for `(owner, kind)`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyActive` if a session for the pair exists; the
    /// existing session is left untouched.
    pub async fn start(
        &self,
        owner: OwnerId,
        payload: SessionPayload,
        now: DateTime<Utc>,
        ttl: Option<Duration>,
    ) -> Result<Session> {
        let kind = payload.kind();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&(owner, kind)) {
            return Err(VortexError::already_active(kind, owner));
        }
        let session = Session::new(owner, payload, now, ttl);
        sessions.insert((owner, kind), session.clone());
        Ok(session)
    }

    /// Returns a snapshot of the session for `(owner, kind)`, if any.
    pub async fn get(&self, owner: OwnerId, kind: ActivityKind) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(&(owner, kind)).cloned()
    }

    /// Applies `mutate` to the live session under the write lock.
    ///
    /// Returns `None` when no session exists for the pair. Used for input
    /// events that update attempt counters in place.
    pub async fn update<T>(
        &self,
        owner: OwnerId,
        kind: ActivityKind,
        mutate: impl FnOnce(&mut Session) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        sessions.get_mut(&(owner, kind)).map(mutate)
    }

    /// Atomically removes and returns the session for `(owner, kind)`.
    ///
    /// This is the settlement tie-break: exactly one of the racing paths
    /// (terminal input event vs. expiry timer) receives the session, and
    /// only that path settles.
    pub async fn take(&self, owner: OwnerId, kind: ActivityKind) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&(owner, kind))
    }

    /// Removes the session if present. Idempotent; absence is not an error.
    pub async fn remove(&self, owner: OwnerId, kind: ActivityKind) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&(owner, kind));
    }

    /// Number of active sessions across all owners.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
