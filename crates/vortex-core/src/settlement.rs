//! Settlement engine.
//!
//! One place computes final reward amounts (base + probabilistic bonus,
//! capped by the daily cap where the path is cap-gated) and issues the
//! ledger credit for each settlement event. Every credit is traced.
//!
//! The daily-cap check is a read on the ledger followed by a separate
//! write; the engine does not assume cross-call atomicity, and the
//! resulting race window is an accepted limitation of the design.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coins::Coins;
use crate::config::RewardConfig;
use crate::error::Result;
use crate::ledger::{LedgerPort, OwnerId};
use crate::question::Difficulty;
use crate::random::RandomSource;
use crate::window::WindowSettlement;

/// Outcome of a mining run settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiningReward {
    pub base: Coins,
    pub bonus: Coins,
}

impl MiningReward {
    pub fn total(self) -> Coins {
        self.base + self.bonus
    }
}

/// Outcome of a farming message micro-reward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FarmingCredit {
    pub base: Coins,
    /// Present when the post-credit bonus roll succeeded; always `2x` base.
    pub bonus: Option<Coins>,
}

/// Computes reward amounts and issues ledger credits.
#[derive(Clone)]
pub struct SettlementEngine {
    ledger: Arc<dyn LedgerPort>,
    random: Arc<dyn RandomSource>,
    config: RewardConfig,
}

impl SettlementEngine {
    pub fn new(
        ledger: Arc<dyn LedgerPort>,
        random: Arc<dyn RandomSource>,
        config: RewardConfig,
    ) -> Self {
        Self {
            ledger,
            random,
            config,
        }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    async fn credit(&self, owner: OwnerId, amount: Coins, reason: &'static str) -> Result<()> {
        self.ledger.credit(owner, amount).await?;
        info!(%owner, %amount, reason, "credited reward");
        Ok(())
    }

    /// Credits the tier reward for a solved quiz.
    pub async fn settle_quiz(&self, owner: OwnerId, difficulty: Difficulty) -> Result<Coins> {
        let reward = self.config.quiz.reward(difficulty);
        self.credit(owner, reward, "quiz").await?;
        Ok(reward)
    }

    /// Rolls the mining reward: base rate over the run length plus
    /// independent rare and epic bonuses. Both rolls may fire.
    pub fn roll_mining_reward(&self) -> MiningReward {
        let mining = &self.config.mining;
        let base = mining.basic_rate * mining.run_minutes();
        let mut bonus = Coins::ZERO;
        if self.random.chance(mining.rare_chance) {
            bonus += mining.rare_bonus;
        }
        if self.random.chance(mining.epic_chance) {
            bonus += mining.epic_bonus;
        }
        MiningReward { base, bonus }
    }

    /// Settles a finished mining run.
    pub async fn settle_mining(&self, owner: OwnerId) -> Result<MiningReward> {
        let reward = self.roll_mining_reward();
        self.credit(owner, reward.total(), "mining").await?;
        Ok(reward)
    }

    /// Credits the guessing-game win reward.
    pub async fn settle_game_win(&self, owner: OwnerId) -> Result<Coins> {
        let reward = self.config.game.win;
        self.credit(owner, reward, "game_win").await?;
        Ok(reward)
    }

    /// Credits the smaller participation reward for a lost game.
    pub async fn settle_game_participation(&self, owner: OwnerId) -> Result<Coins> {
        let reward = self.config.game.participate;
        self.credit(owner, reward, "game_participation").await?;
        Ok(reward)
    }

    /// True while the owner's earnings today are below the daily cap.
    pub async fn under_daily_cap(&self, owner: OwnerId) -> Result<bool> {
        let earned = self.ledger.daily_earnings(owner).await?;
        Ok(earned < self.config.farming.daily_cap)
    }

    /// Settles the farming message micro-reward.
    ///
    /// Message eligibility (length, command prefix, cooldown) is checked by
    /// the caller; this path enforces the daily cap and rolls the post-base
    /// bonus. Returns `None` when the cap blocked the reward. The bonus
    /// roll runs only after the base credit and is not itself gated by a
    /// second cap check.
    pub async fn settle_farming_message(&self, owner: OwnerId) -> Result<Option<FarmingCredit>> {
        if !self.under_daily_cap(owner).await? {
            debug!(%owner, "daily cap reached, message reward skipped");
            return Ok(None);
        }
        let base = self.config.farming.message;
        self.credit(owner, base, "farming_message").await?;

        let bonus = if self.random.chance(self.config.farming.bonus_chance) {
            let bonus = base * 2;
            self.credit(owner, bonus, "farming_bonus").await?;
            Some(bonus)
        } else {
            None
        };
        Ok(Some(FarmingCredit { base, bonus }))
    }

    /// Settles the reaction micro-reward.
    ///
    /// Intentionally weaker admission control than the message path: the
    /// daily cap is the only gate. Returns `None` when capped.
    pub async fn settle_farming_reaction(&self, owner: OwnerId) -> Result<Option<Coins>> {
        if !self.under_daily_cap(owner).await? {
            debug!(%owner, "daily cap reached, reaction reward skipped");
            return Ok(None);
        }
        let reward = self.config.farming.reaction;
        self.credit(owner, reward, "farming_reaction").await?;
        Ok(Some(reward))
    }

    /// Credits each airdrop participant their share.
    ///
    /// The floored per-participant share was computed at window closure;
    /// an empty participant set or a zero share credits nothing.
    pub async fn distribute_airdrop(&self, settlement: &WindowSettlement) -> Result<()> {
        if let WindowSettlement::Airdrop {
            window_id,
            per_participant,
            participants,
            retained,
            ..
        } = settlement
        {
            if per_participant.is_zero() {
                debug!(%window_id, "airdrop settled with no distributable share");
                return Ok(());
            }
            for participant in participants {
                self.credit(*participant, *per_participant, "airdrop").await?;
            }
            info!(
                %window_id,
                recipients = participants.len(),
                %per_participant,
                %retained,
                "airdrop distributed"
            );
        }
        Ok(())
    }
}
