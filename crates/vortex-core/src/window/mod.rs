//! Window domain module.
//!
//! A window is a time-bounded collection of stakeholder input
//! (airdrop participation or weighted governance votes), settled exactly
//! once at closure.
//!
//! # Module Structure
//!
//! - `model`: Window domain model (`Window`, `WindowState`,
//!   `WindowSettlement`)
//! - `collector`: Open-window table with monotone id assignment
//!   (`WindowCollector`)

mod collector;
mod model;

pub use collector::WindowCollector;
pub use model::{VotePolarity, Window, WindowId, WindowKind, WindowSettlement, WindowState};
