//! The Vortex engine facade.
//!
//! Composes the session registry, cooldown tracker, window collector, and
//! settlement engine behind one entry point per user-facing command, plus
//! a single dispatch point per inbound transport event. Long-running
//! activities (mining runs, open windows) are tokio tasks that sleep until
//! their deadline and then perform an atomic take-and-settle, so a timer
//! firing after the session or window is already gone is a silent no-op.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use vortex_core::activity::{GuessState, GuessStep, MiningState, QuizState, QuizStep};
use vortex_core::coins::Coins;
use vortex_core::config::RewardConfig;
use vortex_core::cooldown::CooldownTracker;
use vortex_core::error::{Result, VortexError};
use vortex_core::ledger::{LedgerPort, OwnerId};
use vortex_core::question::{Difficulty, QuestionPool};
use vortex_core::random::RandomSource;
use vortex_core::session::{ActivityKind, SessionPayload, SessionRegistry};
use vortex_core::settlement::SettlementEngine;
use vortex_core::window::{
    VotePolarity, WindowCollector, WindowId, WindowKind, WindowSettlement,
};

use crate::event::EngineEvent;
use crate::outcome::{
    AirdropJoined, AirdropOpened, AnswerOutcome, GameStarted, GuessOutcome, MiningStarted,
    ProposalOpened, QuizStarted, VoteOutcome,
};

/// Marker emoji for airdrop participation.
pub const AIRDROP_EMOJI: &str = "\u{1F381}";
/// Emoji casting a vote in favor.
pub const VOTE_FOR_EMOJI: &str = "\u{1F44D}";
/// Emoji casting a vote against.
pub const VOTE_AGAINST_EMOJI: &str = "\u{1F44E}";

/// The session-and-reward orchestration engine.
///
/// One instance serves all owners; per-owner state lives in the keyed
/// registries. All entry points return a typed outcome value for the
/// transport layer to render. Timer-driven settlements are delivered over
/// the event channel handed out at construction.
pub struct VortexEngine {
    ledger: Arc<dyn LedgerPort>,
    questions: Arc<dyn QuestionPool>,
    random: Arc<dyn RandomSource>,
    sessions: SessionRegistry,
    cooldowns: CooldownTracker,
    windows: WindowCollector,
    settlement: SettlementEngine,
    config: RewardConfig,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl VortexEngine {
    /// Creates an engine and the receiving end of its event channel.
    pub fn new(
        ledger: Arc<dyn LedgerPort>,
        questions: Arc<dyn QuestionPool>,
        random: Arc<dyn RandomSource>,
        config: RewardConfig,
    ) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let settlement = SettlementEngine::new(ledger.clone(), random.clone(), config.clone());
        let engine = Self {
            ledger,
            questions,
            random,
            sessions: SessionRegistry::new(),
            cooldowns: CooldownTracker::new(),
            windows: WindowCollector::new(),
            settlement,
            config,
            events,
        };
        (engine, receiver)
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Quiz
    // ------------------------------------------------------------------

    /// Starts a quiz for the owner at the requested difficulty.
    ///
    /// # Errors
    ///
    /// `AlreadyActive` if the owner has a quiz in flight; `NotEligible`
    /// while the admission cooldown from the previous start request is
    /// running; `EmptyPool` if no questions exist for the difficulty.
    pub async fn start_quiz(&self, owner: OwnerId, difficulty: Difficulty) -> Result<QuizStarted> {
        if self.sessions.get(owner, ActivityKind::Quiz).await.is_some() {
            return Err(VortexError::already_active(ActivityKind::Quiz, owner));
        }
        let now = Utc::now();
        let admission = Duration::seconds(self.config.quiz.admission_cooldown_secs as i64);
        if self
            .cooldowns
            .is_cooling_down(owner, ActivityKind::Quiz, admission, now)
            .await
        {
            return Err(VortexError::not_eligible("quiz cooldown active"));
        }
        let pool = self.questions.questions(difficulty).await?;
        if pool.is_empty() {
            return Err(VortexError::empty_pool(difficulty));
        }
        let question = pool[self.random.pick(pool.len())].clone();
        let reward = self.config.quiz.reward(difficulty);
        let text = question.question.clone();
        self.sessions
            .start(
                owner,
                SessionPayload::Quiz(QuizState::new(question, self.config.quiz.max_attempts)),
                now,
                None,
            )
            .await?;
        self.cooldowns
            .mark_rewarded(owner, ActivityKind::Quiz, now)
            .await;
        info!(%owner, %difficulty, "quiz started");
        Ok(QuizStarted {
            question: text,
            difficulty,
            reward,
        })
    }

    /// Applies one answer to the owner's active quiz.
    ///
    /// # Errors
    ///
    /// `NotFound` when no quiz is active for the owner.
    pub async fn answer_quiz(&self, owner: OwnerId, text: &str) -> Result<AnswerOutcome> {
        let step = self
            .sessions
            .update(owner, ActivityKind::Quiz, |session| {
                match &mut session.payload {
                    SessionPayload::Quiz(quiz) => {
                        Some((quiz.answer(text), quiz.question.difficulty))
                    }
                    _ => None,
                }
            })
            .await
            .flatten()
            .ok_or_else(|| VortexError::not_found("quiz", owner))?;

        match step {
            (QuizStep::Solved, difficulty) => {
                // take() is the tie-break: settle only if this path removed
                // the session.
                if self.sessions.take(owner, ActivityKind::Quiz).await.is_some() {
                    let reward = self.settlement.settle_quiz(owner, difficulty).await?;
                    Ok(AnswerOutcome::Correct { reward })
                } else {
                    Err(VortexError::not_found("quiz", owner))
                }
            }
            (QuizStep::Exhausted { answer }, _) => {
                self.sessions.remove(owner, ActivityKind::Quiz).await;
                info!(%owner, "quiz exhausted");
                Ok(AnswerOutcome::Exhausted { answer })
            }
            (QuizStep::Wrong { attempts_remaining }, _) => {
                Ok(AnswerOutcome::Incorrect { attempts_remaining })
            }
        }
    }

    // ------------------------------------------------------------------
    // Balance
    // ------------------------------------------------------------------

    /// The owner's current ledger balance.
    pub async fn balance(&self, owner: OwnerId) -> Result<Coins> {
        self.ledger.balance(owner).await
    }

    // ------------------------------------------------------------------
    // Mining
    // ------------------------------------------------------------------

    /// Starts a fixed-duration mining run and schedules its settlement.
    ///
    /// # Errors
    ///
    /// `NotEligible` while the admission cooldown from the previous start
    /// request is running; `AlreadyActive` if a run is in progress.
    pub async fn start_mining(&self, owner: OwnerId) -> Result<MiningStarted> {
        let now = Utc::now();
        let mining = &self.config.mining;
        let admission = Duration::seconds(mining.admission_cooldown_secs as i64);
        if self
            .cooldowns
            .is_cooling_down(owner, ActivityKind::Mining, admission, now)
            .await
        {
            return Err(VortexError::not_eligible("mining cooldown active"));
        }

        let run_secs = mining.run_secs;
        let session = self
            .sessions
            .start(
                owner,
                SessionPayload::Mining(MiningState::new(now, run_secs)),
                now,
                Some(Duration::seconds(run_secs as i64)),
            )
            .await?;
        // Admission cooldown runs from the start request, independent of
        // the run itself.
        self.cooldowns
            .mark_rewarded(owner, ActivityKind::Mining, now)
            .await;
        info!(%owner, run_secs, "mining run started");

        let sessions = self.sessions.clone();
        let settlement = self.settlement.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(StdDuration::from_secs(run_secs)).await;
            if sessions.take(owner, ActivityKind::Mining).await.is_none() {
                // Already gone; the other path won the tie-break.
                return;
            }
            match settlement.settle_mining(owner).await {
                Ok(reward) => {
                    let _ = events.send(EngineEvent::MiningComplete {
                        owner,
                        base: reward.base,
                        bonus: reward.bonus,
                        total: reward.total(),
                    });
                }
                Err(err) => warn!(%owner, %err, "mining settlement failed"),
            }
        });

        Ok(MiningStarted {
            run_secs,
            settles_at: session.expires_at.unwrap_or(now),
        })
    }

    // ------------------------------------------------------------------
    // Guessing game
    // ------------------------------------------------------------------

    /// Starts a number guessing game for the owner.
    ///
    /// # Errors
    ///
    /// `AlreadyActive` if the owner has a game in flight.
    pub async fn start_game(&self, owner: OwnerId) -> Result<GameStarted> {
        if self
            .sessions
            .get(owner, ActivityKind::GuessingGame)
            .await
            .is_some()
        {
            return Err(VortexError::already_active(ActivityKind::GuessingGame, owner));
        }
        // Draw the secret only after the duplicate check so a rejected
        // start consumes no randomness.
        let game = &self.config.game;
        let secret = self.random.int_between(game.secret_min, game.secret_max);
        self.sessions
            .start(
                owner,
                SessionPayload::Guess(GuessState::new(secret, game.max_attempts)),
                Utc::now(),
                None,
            )
            .await?;
        info!(%owner, "guessing game started");
        Ok(GameStarted {
            secret_min: game.secret_min,
            secret_max: game.secret_max,
            max_attempts: game.max_attempts,
        })
    }

    /// Applies one guess to the owner's active game.
    ///
    /// # Errors
    ///
    /// `NotFound` when no game is active; `InvalidInput` when the text is
    /// not an integer. The message dispatch path drops non-numeric text
    /// before reaching here.
    pub async fn guess(&self, owner: OwnerId, text: &str) -> Result<GuessOutcome> {
        let value: i64 = text
            .trim()
            .parse()
            .map_err(|_| VortexError::invalid_input("guess must be a number"))?;

        let step = self
            .sessions
            .update(owner, ActivityKind::GuessingGame, |session| {
                match &mut session.payload {
                    SessionPayload::Guess(game) => Some(game.guess(value)),
                    _ => None,
                }
            })
            .await
            .flatten()
            .ok_or_else(|| VortexError::not_found("game", owner))?;

        match step {
            GuessStep::Won => {
                if self
                    .sessions
                    .take(owner, ActivityKind::GuessingGame)
                    .await
                    .is_some()
                {
                    let reward = self.settlement.settle_game_win(owner).await?;
                    Ok(GuessOutcome::Won { reward })
                } else {
                    Err(VortexError::not_found("game", owner))
                }
            }
            GuessStep::Lost { secret } => {
                if self
                    .sessions
                    .take(owner, ActivityKind::GuessingGame)
                    .await
                    .is_some()
                {
                    let reward = self.settlement.settle_game_participation(owner).await?;
                    Ok(GuessOutcome::Lost { secret, reward })
                } else {
                    Err(VortexError::not_found("game", owner))
                }
            }
            GuessStep::Hint {
                higher,
                attempts_remaining,
            } => Ok(GuessOutcome::Hint {
                higher,
                attempts_remaining,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Governance
    // ------------------------------------------------------------------

    /// Opens a governance proposal window.
    ///
    /// # Errors
    ///
    /// `NotEligible` when the creator's balance is below the proposal
    /// threshold. The threshold is checked once, here.
    pub async fn create_proposal(&self, owner: OwnerId, text: &str) -> Result<ProposalOpened> {
        let threshold = self.config.governance.proposal_threshold;
        let balance = self.ledger.balance(owner).await?;
        if balance < threshold {
            return Err(VortexError::not_eligible(format!(
                "creating a proposal requires a balance of at least {threshold}"
            )));
        }

        let window_secs = self.config.governance.vote_window_secs;
        let window = self
            .windows
            .open_proposal(
                text.to_string(),
                owner,
                Utc::now(),
                Duration::seconds(window_secs as i64),
            )
            .await;
        info!(%owner, window_id = %window.id, "proposal opened");
        self.schedule_window_close(window.id, StdDuration::from_secs(window_secs));
        Ok(ProposalOpened {
            window_id: window.id,
            closes_at: window.closes_at,
        })
    }

    /// Records a weighted vote on an open proposal.
    ///
    /// Voting weight is the voter's balance at the moment of the vote, so
    /// weight is time-varying by design.
    ///
    /// # Errors
    ///
    /// `NotFound` when the window is closed or never existed.
    pub async fn vote(
        &self,
        owner: OwnerId,
        window_id: WindowId,
        polarity: VotePolarity,
    ) -> Result<VoteOutcome> {
        let weight = self.ledger.balance(owner).await?;
        let recorded = self
            .windows
            .record_vote(window_id, owner, polarity, weight)
            .await?;
        if recorded {
            info!(%owner, %window_id, %polarity, %weight, "vote recorded");
            Ok(VoteOutcome::Recorded { weight })
        } else {
            Ok(VoteOutcome::AlreadyVoted)
        }
    }

    // ------------------------------------------------------------------
    // Airdrop
    // ------------------------------------------------------------------

    /// Opens an airdrop window distributing `pool` after
    /// `duration_minutes`.
    pub async fn start_airdrop(
        &self,
        owner: OwnerId,
        pool: Coins,
        duration_minutes: u64,
    ) -> Result<AirdropOpened> {
        if pool <= Coins::ZERO {
            return Err(VortexError::invalid_input("airdrop pool must be positive"));
        }
        let window = self
            .windows
            .open_airdrop(
                pool,
                Utc::now(),
                Duration::seconds((duration_minutes * 60) as i64),
            )
            .await;
        info!(%owner, window_id = %window.id, %pool, duration_minutes, "airdrop opened");
        self.schedule_window_close(window.id, StdDuration::from_secs(duration_minutes * 60));
        Ok(AirdropOpened {
            window_id: window.id,
            pool,
            closes_at: window.closes_at,
        })
    }

    /// Adds the owner to the most recently opened airdrop still
    /// collecting participants.
    ///
    /// # Errors
    ///
    /// `NotFound` when no airdrop window is open.
    pub async fn record_airdrop_reaction(&self, owner: OwnerId) -> Result<AirdropJoined> {
        let window_id = self
            .windows
            .latest_open(WindowKind::Airdrop)
            .await
            .ok_or_else(|| VortexError::not_found("airdrop", "open"))?;
        let newly_joined = self.windows.record_participation(window_id, owner).await?;
        Ok(AirdropJoined {
            window_id,
            newly_joined,
        })
    }

    /// Schedules the single settlement of a window at its deadline.
    fn schedule_window_close(&self, window_id: WindowId, after: StdDuration) {
        let windows = self.windows.clone();
        let settlement = self.settlement.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let Some(window) = windows.take(window_id).await else {
                return;
            };
            let result = window.settle();
            match &result {
                WindowSettlement::Airdrop {
                    per_participant,
                    participants,
                    ..
                } => {
                    if participants.is_empty() {
                        let _ = events.send(EngineEvent::AirdropExpiredEmpty { window_id });
                        return;
                    }
                    match settlement.distribute_airdrop(&result).await {
                        Ok(()) => {
                            let _ = events.send(EngineEvent::AirdropSettled {
                                window_id,
                                per_participant: *per_participant,
                                recipients: participants.clone(),
                            });
                        }
                        Err(err) => warn!(%window_id, %err, "airdrop distribution failed"),
                    }
                }
                WindowSettlement::Proposal {
                    for_weight,
                    against_weight,
                    voter_count,
                    ..
                } => {
                    info!(%window_id, %for_weight, %against_weight, "proposal closed");
                    let _ = events.send(EngineEvent::ProposalClosed {
                        window_id,
                        for_weight: *for_weight,
                        against_weight: *against_weight,
                        voter_count: *voter_count,
                    });
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Inbound event dispatch
    // ------------------------------------------------------------------

    /// Dispatches one inbound chat message.
    ///
    /// Fixed order: quiz answer, then social farming, then game guess.
    /// Non-numeric text during an active game is silently ignored; the
    /// channel carries unrelated chatter.
    pub async fn handle_message(&self, owner: OwnerId, text: &str) -> Result<Vec<EngineEvent>> {
        let mut notices = Vec::new();

        if self.sessions.get(owner, ActivityKind::Quiz).await.is_some() {
            match self.answer_quiz(owner, text).await {
                Ok(AnswerOutcome::Correct { reward }) => {
                    notices.push(EngineEvent::QuizSolved { owner, reward });
                }
                Ok(AnswerOutcome::Incorrect { attempts_remaining }) => {
                    notices.push(EngineEvent::QuizWrong {
                        owner,
                        attempts_remaining,
                    });
                }
                Ok(AnswerOutcome::Exhausted { answer }) => {
                    notices.push(EngineEvent::QuizExhausted { owner, answer });
                }
                // The session vanished between the lookup and the answer;
                // nothing to report.
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        self.farm_message(owner, text, &mut notices).await?;

        if self
            .sessions
            .get(owner, ActivityKind::GuessingGame)
            .await
            .is_some()
            && text.trim().parse::<i64>().is_ok()
        {
            match self.guess(owner, text).await {
                Ok(GuessOutcome::Won { reward }) => {
                    notices.push(EngineEvent::GuessCorrect { owner, reward });
                }
                Ok(GuessOutcome::Lost { secret, reward }) => {
                    notices.push(EngineEvent::GuessLost {
                        owner,
                        secret,
                        reward,
                    });
                }
                Ok(GuessOutcome::Hint {
                    higher,
                    attempts_remaining,
                }) => {
                    notices.push(EngineEvent::GuessHint {
                        owner,
                        higher,
                        attempts_remaining,
                    });
                }
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        Ok(notices)
    }

    /// Settles the farming message micro-reward when the message is
    /// eligible: long enough, not a command, cooldown elapsed, and below
    /// the daily cap.
    async fn farm_message(
        &self,
        owner: OwnerId,
        text: &str,
        notices: &mut Vec<EngineEvent>,
    ) -> Result<()> {
        let farming = &self.config.farming;
        if text.chars().count() < farming.min_message_len
            || text.starts_with(farming.command_prefix)
        {
            return Ok(());
        }
        let now = Utc::now();
        let window = Duration::seconds(farming.message_cooldown_secs as i64);
        if self
            .cooldowns
            .is_cooling_down(owner, ActivityKind::Farming, window, now)
            .await
        {
            return Ok(());
        }
        if let Some(credit) = self.settlement.settle_farming_message(owner).await? {
            self.cooldowns
                .mark_rewarded(owner, ActivityKind::Farming, now)
                .await;
            notices.push(EngineEvent::FarmingRewarded {
                owner,
                reward: credit.base,
            });
            if let Some(bonus) = credit.bonus {
                notices.push(EngineEvent::FarmingBonus { owner, bonus });
            }
        }
        Ok(())
    }

    /// Dispatches one inbound reaction event.
    ///
    /// One dispatch point per reaction, routing in a fixed order: airdrop
    /// participation, then governance vote, then the farming reaction
    /// micro-reward. `proposal_hint` identifies the proposal window the
    /// reacted-to message belongs to, when the transport knows it.
    pub async fn handle_reaction(
        &self,
        owner: OwnerId,
        emoji: &str,
        proposal_hint: Option<WindowId>,
    ) -> Result<Vec<EngineEvent>> {
        let mut notices = Vec::new();

        if emoji == AIRDROP_EMOJI {
            match self.record_airdrop_reaction(owner).await {
                Ok(joined) => {
                    debug!(%owner, window_id = %joined.window_id, newly = joined.newly_joined,
                        "airdrop participation recorded");
                }
                // No airdrop open; reactions are unrelated chatter then.
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        let polarity = match emoji {
            VOTE_FOR_EMOJI => Some(VotePolarity::For),
            VOTE_AGAINST_EMOJI => Some(VotePolarity::Against),
            _ => None,
        };
        if let (Some(polarity), Some(window_id)) = (polarity, proposal_hint) {
            match self.vote(owner, window_id, polarity).await {
                Ok(_) => {}
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }

        if let Some(reward) = self.settlement.settle_farming_reaction(owner).await? {
            notices.push(EngineEvent::ReactionRewarded { owner, reward });
        }

        Ok(notices)
    }
}
