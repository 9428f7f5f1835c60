//! Session domain module.
//!
//! This module contains the session model and the registry that owns all
//! active sessions.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `SessionPayload`,
//!   `ActivityKind`)
//! - `registry`: Keyed container enforcing one active session per
//!   `(owner, kind)` (`SessionRegistry`)

mod model;
mod registry;

pub use model::{ActivityKind, Session, SessionPayload};
pub use registry::SessionRegistry;
