//! Error types for the Vortex engine.

use serde::Serialize;
use thiserror::Error;

use crate::session::ActivityKind;

/// A shared error type for the entire Vortex engine.
///
/// Every variant is an expected, locally handled outcome surfaced to the
/// caller as a typed result. Nothing here should terminate the process;
/// the transport layer renders each rejection as a short human-readable
/// reason.
#[derive(Error, Debug, Clone, Serialize)]
pub enum VortexError {
    /// A session or window of this kind is already active for the owner.
    #[error("Already active: {kind} session for owner '{owner}'")]
    AlreadyActive { kind: ActivityKind, owner: String },

    /// The owner is not eligible right now (cooldown, daily cap, or a
    /// balance threshold).
    #[error("Not eligible: {reason}")]
    NotEligible { reason: String },

    /// Action on a session or window that does not exist.
    #[error("Not found: {entity} '{id}'")]
    NotFound { entity: &'static str, id: String },

    /// No quiz questions available for the requested difficulty.
    #[error("No questions available for difficulty '{difficulty}'")]
    EmptyPool { difficulty: String },

    /// Input that cannot be interpreted for the requested operation.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// An external collaborator (ledger store, question pool) failed.
    /// The engine does not retry internally; retry policy belongs to the
    /// collaborator's own client.
    #[error("Dependency unavailable: {source_name} - {message}")]
    DependencyUnavailable {
        source_name: &'static str,
        message: String,
    },

    /// Configuration error (malformed reward config, invalid probability).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VortexError {
    /// Creates an AlreadyActive error.
    pub fn already_active(kind: ActivityKind, owner: impl ToString) -> Self {
        Self::AlreadyActive {
            kind,
            owner: owner.to_string(),
        }
    }

    /// Creates a NotEligible error.
    pub fn not_eligible(reason: impl Into<String>) -> Self {
        Self::NotEligible {
            reason: reason.into(),
        }
    }

    /// Creates a NotFound error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates an EmptyPool error.
    pub fn empty_pool(difficulty: impl ToString) -> Self {
        Self::EmptyPool {
            difficulty: difficulty.to_string(),
        }
    }

    /// Creates an InvalidInput error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a DependencyUnavailable error.
    pub fn dependency(source_name: &'static str, message: impl Into<String>) -> Self {
        Self::DependencyUnavailable {
            source_name,
            message: message.into(),
        }
    }

    /// Creates a Config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an AlreadyActive error.
    pub fn is_already_active(&self) -> bool {
        matches!(self, Self::AlreadyActive { .. })
    }

    /// Check if this is a NotEligible error.
    pub fn is_not_eligible(&self) -> bool {
        matches!(self, Self::NotEligible { .. })
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an EmptyPool error.
    pub fn is_empty_pool(&self) -> bool {
        matches!(self, Self::EmptyPool { .. })
    }
}

impl From<toml::de::Error> for VortexError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, VortexError>`.
pub type Result<T> = std::result::Result<T, VortexError>;
