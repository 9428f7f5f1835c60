//! Shared test fixtures for engine integration tests.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedReceiver;

use vortex_application::{EngineEvent, VortexEngine};
use vortex_core::Coins;
use vortex_core::config::RewardConfig;
use vortex_core::question::{Difficulty, QuizQuestion};
use vortex_core::random::RandomSource;
use vortex_infrastructure::{MemoryLedger, StaticQuestionPool};

/// Randomness that replays a script of chance outcomes and returns fixed
/// values for sampling.
pub struct ScriptedRandom {
    chances: Mutex<Vec<bool>>,
    secret: i64,
}

impl ScriptedRandom {
    pub fn new(chances: Vec<bool>, secret: i64) -> Self {
        Self {
            chances: Mutex::new(chances),
            secret,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn chance(&self, _probability: f64) -> bool {
        let mut chances = self.chances.lock().unwrap();
        if chances.is_empty() {
            false
        } else {
            chances.remove(0)
        }
    }

    fn pick(&self, _len: usize) -> usize {
        0
    }

    fn int_between(&self, _min: i64, _max: i64) -> i64 {
        self.secret
    }
}

/// Economy mirroring the documented numbers with one unit per whole coin.
pub fn test_config() -> RewardConfig {
    let mut config = RewardConfig::default();
    config.quiz.easy = Coins::new(5);
    config.quiz.medium = Coins::new(10);
    config.quiz.hard = Coins::new(20);
    config.farming.message = Coins::new(1);
    config.farming.reaction = Coins::new(1);
    config.farming.daily_cap = Coins::new(50);
    config.mining.basic_rate = Coins::new(1);
    config.mining.rare_bonus = Coins::new(5);
    config.mining.epic_bonus = Coins::new(10);
    config.game.win = Coins::new(10);
    config.game.participate = Coins::new(2);
    config.governance.proposal_threshold = Coins::new(100);
    config
}

pub struct TestHarness {
    pub engine: VortexEngine,
    pub events: UnboundedReceiver<EngineEvent>,
    pub ledger: Arc<MemoryLedger>,
}

/// Builds an engine over an in-memory ledger, a single easy question, and
/// scripted randomness.
pub fn harness(config: RewardConfig, chances: Vec<bool>, secret: i64) -> TestHarness {
    let ledger = Arc::new(MemoryLedger::new());
    let pool = Arc::new(StaticQuestionPool::new(vec![QuizQuestion {
        question: "2+2?".to_string(),
        answer: "4".to_string(),
        difficulty: Difficulty::Easy,
    }]));
    let random = Arc::new(ScriptedRandom::new(chances, secret));
    let (engine, events) = VortexEngine::new(ledger.clone(), pool, random, config);
    TestHarness {
        engine,
        events,
        ledger,
    }
}
