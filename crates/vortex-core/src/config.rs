//! Reward configuration.
//!
//! Every cap, cooldown, probability, and reward amount the engine uses is
//! collected here so deployments can tune the economy without code changes.
//! Amounts are [`Coins`] in the ledger's minor unit; the defaults below use
//! one tenth of a coin as the unit, which lets the half-coin reaction reward
//! stay an integer.

use serde::{Deserialize, Serialize};

use crate::coins::Coins;
use crate::error::{Result, VortexError};
use crate::question::Difficulty;

/// Root reward configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RewardConfig {
    pub quiz: QuizConfig,
    pub farming: FarmingConfig,
    pub mining: MiningConfig,
    pub game: GameConfig,
    pub governance: GovernanceConfig,
}

impl RewardConfig {
    /// Parses a configuration from a TOML document.
    ///
    /// Missing sections and fields fall back to their defaults, so a config
    /// file only needs to spell out the values it overrides.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RewardConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every probability is a valid Bernoulli parameter.
    pub fn validate(&self) -> Result<()> {
        for (name, p) in [
            ("farming.bonus_chance", self.farming.bonus_chance),
            ("mining.rare_chance", self.mining.rare_chance),
            ("mining.epic_chance", self.mining.epic_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(VortexError::config(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        if self.game.secret_min > self.game.secret_max {
            return Err(VortexError::config("game secret range is empty"));
        }
        Ok(())
    }
}

/// Quiz tier rewards, attempt limit, and start cooldown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub easy: Coins,
    pub medium: Coins,
    pub hard: Coins,
    pub max_attempts: u32,
    /// Admission-control cooldown between quiz starts for one owner,
    /// recorded at the start request.
    pub admission_cooldown_secs: u64,
}

impl QuizConfig {
    /// Reward for solving a quiz of the given tier.
    pub fn reward(&self, difficulty: Difficulty) -> Coins {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            easy: Coins::new(50),
            medium: Coins::new(100),
            hard: Coins::new(200),
            max_attempts: 3,
            admission_cooldown_secs: 300,
        }
    }
}

/// Social-farming micro-reward settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmingConfig {
    /// Reward per eligible chat message.
    pub message: Coins,
    /// Reward per reaction event. Rate-limited only by the daily cap.
    pub reaction: Coins,
    /// Upper bound on micro-rewards per owner per calendar day.
    pub daily_cap: Coins,
    /// Minimum elapsed seconds between message rewards for one owner.
    pub message_cooldown_secs: u64,
    /// Messages shorter than this never farm.
    pub min_message_len: usize,
    /// Messages starting with this prefix are commands, never farmed.
    pub command_prefix: char,
    /// Probability of the 2x bonus after a base message reward.
    pub bonus_chance: f64,
}

impl Default for FarmingConfig {
    fn default() -> Self {
        Self {
            message: Coins::new(10),
            reaction: Coins::new(5),
            daily_cap: Coins::new(500),
            message_cooldown_secs: 60,
            min_message_len: 10,
            command_prefix: '!',
            bonus_chance: 0.10,
        }
    }
}

/// Mining run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Base reward per minute of a run.
    pub basic_rate: Coins,
    pub rare_bonus: Coins,
    pub rare_chance: f64,
    pub epic_bonus: Coins,
    pub epic_chance: f64,
    /// Length of one run.
    pub run_secs: u64,
    /// Admission-control cooldown between start requests, independent of
    /// the run length.
    pub admission_cooldown_secs: u64,
}

impl MiningConfig {
    /// Whole minutes in one run, the multiplier for `basic_rate`.
    pub fn run_minutes(&self) -> i64 {
        (self.run_secs / 60) as i64
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            basic_rate: Coins::new(10),
            rare_bonus: Coins::new(50),
            rare_chance: 0.10,
            epic_bonus: Coins::new(100),
            epic_chance: 0.05,
            run_secs: 300,
            admission_cooldown_secs: 3600,
        }
    }
}

/// Guessing game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub win: Coins,
    pub participate: Coins,
    pub secret_min: i64,
    pub secret_max: i64,
    pub max_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win: Coins::new(100),
            participate: Coins::new(20),
            secret_min: 1,
            secret_max: 100,
            max_attempts: 5,
        }
    }
}

/// Governance settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Minimum creator balance to open a proposal, checked once at open.
    pub proposal_threshold: Coins,
    /// Voting window length.
    pub vote_window_secs: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            proposal_threshold: Coins::new(1000),
            vote_window_secs: 86_400,
        }
    }
}
