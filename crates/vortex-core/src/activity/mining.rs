//! Mining state machine.
//!
//! A run has no input events: `Running(start_time)` until its timer fires,
//! at which point the settlement engine computes `basic_rate x minutes`
//! plus independent rare/epic bonus rolls. Admission control (the cooldown
//! between start requests) lives outside the session itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// In-flight state of one mining run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningState {
    pub started_at: DateTime<Utc>,
    pub run_secs: u64,
}

impl MiningState {
    pub fn new(started_at: DateTime<Utc>, run_secs: u64) -> Self {
        Self {
            started_at,
            run_secs,
        }
    }
}
