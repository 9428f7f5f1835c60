//! Engine integration tests: quiz, guessing game, farming, and mining.

mod common;

use common::{harness, test_config};

use vortex_application::{AnswerOutcome, EngineEvent, GuessOutcome};
use vortex_core::Coins;
use vortex_core::ledger::{LedgerPort, OwnerId};
use vortex_core::question::Difficulty;

const ALICE: OwnerId = OwnerId(1);
const BOB: OwnerId = OwnerId(2);

// ----------------------------------------------------------------------
// Quiz
// ----------------------------------------------------------------------

#[tokio::test]
async fn quiz_end_to_end() {
    let h = harness(test_config(), vec![], 0);

    let started = h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();
    assert_eq!(started.question, "2+2?");
    assert_eq!(started.reward, Coins::new(5));

    let outcome = h.engine.answer_quiz(ALICE, "4").await.unwrap();
    assert_eq!(
        outcome,
        AnswerOutcome::Correct {
            reward: Coins::new(5)
        }
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(5));

    // The session is gone; a second reply finds nothing to answer.
    let err = h.engine.answer_quiz(ALICE, "4").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn quiz_answer_is_case_insensitive() {
    let h = harness(test_config(), vec![], 0);
    h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();
    // One wrong attempt first, then the answer with stray casing/spacing.
    h.engine.answer_quiz(ALICE, "five").await.unwrap();
    let outcome = h.engine.answer_quiz(ALICE, " 4 ").await.unwrap();
    assert!(matches!(outcome, AnswerOutcome::Correct { .. }));
}

#[tokio::test]
async fn quiz_double_start_rejected_and_original_untouched() {
    let h = harness(test_config(), vec![], 0);
    h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();
    h.engine.answer_quiz(ALICE, "wrong").await.unwrap();

    let err = h
        .engine
        .start_quiz(ALICE, Difficulty::Easy)
        .await
        .unwrap_err();
    assert!(err.is_already_active());

    // The original session kept its attempt count.
    let outcome = h.engine.answer_quiz(ALICE, "also wrong").await.unwrap();
    assert_eq!(
        outcome,
        AnswerOutcome::Incorrect {
            attempts_remaining: 1
        }
    );
}

#[tokio::test]
async fn quiz_exhaustion_credits_nothing() {
    let h = harness(test_config(), vec![], 0);
    h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();

    h.engine.answer_quiz(ALICE, "a").await.unwrap();
    h.engine.answer_quiz(ALICE, "b").await.unwrap();
    let outcome = h.engine.answer_quiz(ALICE, "c").await.unwrap();
    assert_eq!(
        outcome,
        AnswerOutcome::Exhausted {
            answer: "4".to_string()
        }
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::ZERO);
    assert!(h.engine.answer_quiz(ALICE, "4").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn quiz_admission_cooldown_blocks_restart() {
    let h = harness(test_config(), vec![], 0);

    h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();
    h.engine.answer_quiz(ALICE, "4").await.unwrap();

    // The session is gone, but the 5-minute start cooldown runs from the
    // first start request.
    let err = h
        .engine
        .start_quiz(ALICE, Difficulty::Easy)
        .await
        .unwrap_err();
    assert!(err.is_not_eligible());

    // The cooldown is per owner.
    h.engine.start_quiz(BOB, Difficulty::Easy).await.unwrap();
}

#[tokio::test]
async fn quiz_restarts_without_admission_cooldown() {
    let mut config = test_config();
    config.quiz.admission_cooldown_secs = 0;
    let h = harness(config, vec![], 0);

    h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();
    h.engine.answer_quiz(ALICE, "4").await.unwrap();
    h.engine.start_quiz(ALICE, Difficulty::Easy).await.unwrap();
}

#[tokio::test]
async fn quiz_empty_pool_rejected() {
    let h = harness(test_config(), vec![], 0);
    let err = h
        .engine
        .start_quiz(ALICE, Difficulty::Hard)
        .await
        .unwrap_err();
    assert!(err.is_empty_pool());
}

// ----------------------------------------------------------------------
// Guessing game
// ----------------------------------------------------------------------

#[tokio::test]
async fn game_win_credits_win_reward() {
    let h = harness(test_config(), vec![], 42);
    h.engine.start_game(ALICE).await.unwrap();

    let hint = h.engine.guess(ALICE, "10").await.unwrap();
    assert_eq!(
        hint,
        GuessOutcome::Hint {
            higher: true,
            attempts_remaining: 4
        }
    );
    let hint = h.engine.guess(ALICE, "90").await.unwrap();
    assert_eq!(
        hint,
        GuessOutcome::Hint {
            higher: false,
            attempts_remaining: 3
        }
    );

    let outcome = h.engine.guess(ALICE, "42").await.unwrap();
    assert_eq!(
        outcome,
        GuessOutcome::Won {
            reward: Coins::new(10)
        }
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(10));
    assert!(h.engine.guess(ALICE, "42").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn game_loss_credits_participation() {
    let h = harness(test_config(), vec![], 42);
    h.engine.start_game(ALICE).await.unwrap();

    for wrong in ["1", "2", "3", "4"] {
        h.engine.guess(ALICE, wrong).await.unwrap();
    }
    let outcome = h.engine.guess(ALICE, "5").await.unwrap();
    assert_eq!(
        outcome,
        GuessOutcome::Lost {
            secret: 42,
            reward: Coins::new(2)
        }
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(2));
}

#[tokio::test]
async fn game_double_start_rejected_without_drawing_a_secret() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use vortex_application::VortexEngine;
    use vortex_core::random::RandomSource;
    use vortex_infrastructure::{MemoryLedger, StaticQuestionPool};

    #[derive(Default)]
    struct CountingRandom {
        draws: AtomicUsize,
    }

    impl RandomSource for CountingRandom {
        fn chance(&self, _probability: f64) -> bool {
            false
        }

        fn pick(&self, _len: usize) -> usize {
            0
        }

        fn int_between(&self, min: i64, _max: i64) -> i64 {
            self.draws.fetch_add(1, Ordering::SeqCst);
            min
        }
    }

    let random = Arc::new(CountingRandom::default());
    let (engine, _events) = VortexEngine::new(
        Arc::new(MemoryLedger::new()),
        Arc::new(StaticQuestionPool::new(vec![])),
        random.clone(),
        test_config(),
    );

    engine.start_game(ALICE).await.unwrap();
    let err = engine.start_game(ALICE).await.unwrap_err();
    assert!(err.is_already_active());
    // The rejected start never drew a secret.
    assert_eq!(random.draws.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn game_non_numeric_chatter_is_ignored() {
    let h = harness(test_config(), vec![], 42);
    h.engine.start_game(ALICE).await.unwrap();

    // Short non-numeric text: not a guess, not farmable, no events.
    let notices = h.engine.handle_message(ALICE, "hmm").await.unwrap();
    assert!(notices.is_empty());

    // The game is still on and unaffected.
    let outcome = h.engine.guess(ALICE, "42").await.unwrap();
    assert!(matches!(outcome, GuessOutcome::Won { .. }));
}

// ----------------------------------------------------------------------
// Social farming
// ----------------------------------------------------------------------

#[tokio::test]
async fn farming_rewards_eligible_message_once_per_cooldown() {
    let h = harness(test_config(), vec![false, false], 0);

    let notices = h
        .engine
        .handle_message(ALICE, "hello everyone, nice day")
        .await
        .unwrap();
    assert_eq!(
        notices,
        vec![EngineEvent::FarmingRewarded {
            owner: ALICE,
            reward: Coins::new(1)
        }]
    );

    // Second eligible message inside the 60s cooldown earns nothing.
    let notices = h
        .engine
        .handle_message(ALICE, "another long enough message")
        .await
        .unwrap();
    assert!(notices.is_empty());
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(1));

    // Cooldowns are per owner.
    let notices = h
        .engine
        .handle_message(BOB, "different owner, long message")
        .await
        .unwrap();
    assert_eq!(notices.len(), 1);
}

#[tokio::test]
async fn farming_ignores_short_and_command_messages() {
    let h = harness(test_config(), vec![false], 0);

    assert!(h.engine.handle_message(ALICE, "short").await.unwrap().is_empty());
    assert!(
        h.engine
            .handle_message(ALICE, "!command with plenty of text")
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::ZERO);
}

#[tokio::test]
async fn farming_bonus_pays_double_and_announces() {
    let h = harness(test_config(), vec![true], 0);

    let notices = h
        .engine
        .handle_message(ALICE, "a perfectly valid farm message")
        .await
        .unwrap();
    assert_eq!(
        notices,
        vec![
            EngineEvent::FarmingRewarded {
                owner: ALICE,
                reward: Coins::new(1)
            },
            EngineEvent::FarmingBonus {
                owner: ALICE,
                bonus: Coins::new(2)
            },
        ]
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(3));
}

#[tokio::test]
async fn farming_blocked_at_daily_cap() {
    let h = harness(test_config(), vec![false], 0);
    // Put today's earnings at the cap.
    h.ledger.credit(ALICE, Coins::new(50)).await.unwrap();

    let notices = h
        .engine
        .handle_message(ALICE, "long enough but over the cap")
        .await
        .unwrap();
    assert!(notices.is_empty());

    // Reactions are blocked by the same cap.
    let notices = h.engine.handle_reaction(ALICE, "✨", None).await.unwrap();
    assert!(notices.is_empty());
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(50));
}

#[tokio::test]
async fn reaction_rewards_without_cooldown() {
    let h = harness(test_config(), vec![], 0);

    for _ in 0..3 {
        let notices = h.engine.handle_reaction(ALICE, "✨", None).await.unwrap();
        assert_eq!(
            notices,
            vec![EngineEvent::ReactionRewarded {
                owner: ALICE,
                reward: Coins::new(1)
            }]
        );
    }
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(3));
}

// ----------------------------------------------------------------------
// Mining
// ----------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn mining_settles_base_when_no_bonus_fires() {
    let mut h = harness(test_config(), vec![false, false], 0);

    let started = h.engine.start_mining(ALICE).await.unwrap();
    assert_eq!(started.run_secs, 300);
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::ZERO);

    // Awaiting the event auto-advances the paused clock past the run.
    let event = h.events.recv().await.unwrap();
    assert_eq!(
        event,
        EngineEvent::MiningComplete {
            owner: ALICE,
            base: Coins::new(5),
            bonus: Coins::ZERO,
            total: Coins::new(5),
        }
    );
    assert_eq!(h.engine.balance(ALICE).await.unwrap(), Coins::new(5));
}

#[tokio::test(start_paused = true)]
async fn mining_bonus_rolls_are_independent() {
    let cases = [
        (vec![true, false], Coins::new(5)),
        (vec![false, true], Coins::new(10)),
        (vec![true, true], Coins::new(15)),
    ];
    for (script, expected_bonus) in cases {
        let mut h = harness(test_config(), script, 0);
        h.engine.start_mining(ALICE).await.unwrap();
        match h.events.recv().await.unwrap() {
            EngineEvent::MiningComplete { base, bonus, total, .. } => {
                assert_eq!(base, Coins::new(5));
                assert_eq!(bonus, expected_bonus);
                assert_eq!(total, base + expected_bonus);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn mining_admission_cooldown_blocks_restart() {
    let mut h = harness(test_config(), vec![false, false], 0);

    h.engine.start_mining(ALICE).await.unwrap();
    // Admission control rejects before the session check does.
    let err = h.engine.start_mining(ALICE).await.unwrap_err();
    assert!(err.is_not_eligible());

    // The cooldown runs from the start request, so even after the run
    // settles a restart stays blocked.
    h.events.recv().await.unwrap();
    let err = h.engine.start_mining(ALICE).await.unwrap_err();
    assert!(err.is_not_eligible());
}

#[tokio::test(start_paused = true)]
async fn mining_double_start_rejected_without_admission_cooldown() {
    let mut config = test_config();
    config.mining.admission_cooldown_secs = 0;
    let h = harness(config, vec![false, false], 0);

    h.engine.start_mining(ALICE).await.unwrap();
    let err = h.engine.start_mining(ALICE).await.unwrap_err();
    assert!(err.is_already_active());
}
