//! Vortex infrastructure layer.
//!
//! Adapter implementations of the core ports: an in-memory ledger with a
//! calendar-day earnings counter, a static question pool, and reward
//! config file loading. Durable backends plug in by implementing the same
//! port traits.

mod config_file;
mod memory_ledger;
mod static_question_pool;

pub use config_file::load_reward_config;
pub use memory_ledger::MemoryLedger;
pub use static_question_pool::StaticQuestionPool;
