//! Reward configuration file loading.

use std::path::Path;

use tracing::info;

use vortex_core::config::RewardConfig;
use vortex_core::error::{Result, VortexError};

/// Loads a [`RewardConfig`] from a TOML file.
///
/// Missing fields fall back to defaults, so deployments only spell out
/// their overrides.
pub fn load_reward_config(path: impl AsRef<Path>) -> Result<RewardConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| VortexError::config(format!("read {path:?}: {e}")))?;
    let config = RewardConfig::from_toml_str(&text)?;
    info!(?path, "reward config loaded");
    Ok(config)
}
