use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Weekday};
use dayguess_core::ManualClock;
use dayguess_core::model::{LeaderboardMode, Mode, ScoreEntry, ScoreError, ScoreSubmission};
use dayguess_core::time::manual_clock;
use reqwest::StatusCode;
use services::{
    GameController, GatewayError, LeaderboardGateway, ManualCountdown, RoundEngine, SaveState,
    Screen, ScriptedDates, SessionError, TokioCountdown,
};

/// Records submissions and fails on demand.
#[derive(Default)]
struct RecordingGateway {
    fail: AtomicBool,
    submitted: Mutex<Vec<ScoreSubmission>>,
}

impl RecordingGateway {
    fn calls(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl LeaderboardGateway for RecordingGateway {
    async fn fetch_scores(&self) -> Result<Vec<ScoreEntry>, GatewayError> {
        let submitted = self.submitted.lock().unwrap();
        Ok(submitted.iter().map(ScoreSubmission::to_entry).collect())
    }

    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), GatewayError> {
        self.submitted.lock().unwrap().push(submission.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::Server {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "db down".into(),
            });
        }
        Ok(())
    }
}

fn millennium() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

fn moon_landing() -> NaiveDate {
    NaiveDate::from_ymd_opt(1969, 7, 20).unwrap()
}

fn game() -> (GameController, ManualClock, Arc<ManualCountdown>) {
    let (clock, handle) = manual_clock();
    let dates = ScriptedDates::new([millennium(), moon_landing()]).unwrap();
    let engine = RoundEngine::new(Box::new(dates), clock);
    let countdown = Arc::new(ManualCountdown::new());
    (GameController::new(engine, countdown.clone()), handle, countdown)
}

/// Answers every round correctly, two seconds each, until results.
fn play_perfect_challenge(game: &mut GameController, clock: &ManualClock, rounds: u32) {
    game.start_session(Mode::Challenge { rounds }).unwrap();
    for _ in 0..rounds {
        clock.advance_secs(2);
        let weekday = if game.snapshot().round.unwrap().date == millennium() {
            Weekday::Sat
        } else {
            Weekday::Sun
        };
        assert!(game.record_guess(weekday).unwrap().was_correct);
        game.advance().unwrap();
    }
}

#[test]
fn challenge_ends_after_configured_rounds() {
    let (mut game, clock, _) = game();
    game.start_session(Mode::Challenge { rounds: 5 }).unwrap();

    for round in 1..=5 {
        assert_eq!(game.session().unwrap().round_index(), round);
        clock.advance_secs(2);
        let outcome = game.record_guess(Weekday::Sat).unwrap();
        assert_eq!(outcome.was_correct, round % 2 == 1);
        let screen = game.advance().unwrap();
        let expected = if round == 5 { Screen::Results } else { Screen::Playing };
        assert_eq!(screen, expected);
    }

    let summary = game.summary().unwrap();
    assert_eq!(summary.correct_count(), 3);
    assert_eq!(summary.total_attempts(), 5);
    assert_eq!(summary.round_count(), Some(5));
    assert!((summary.total_elapsed_seconds() - 10.0).abs() < 1e-9);
    assert!((summary.average_seconds_per_round().unwrap() - 2.0).abs() < 1e-9);
    assert!(game.session().unwrap().is_ended());
    assert!(game.snapshot().round.is_none());
}

#[test]
fn practice_never_reaches_results() {
    let (mut game, _, _) = game();
    game.start_session(Mode::Practice).unwrap();
    for _ in 0..25 {
        game.record_guess(Weekday::Mon).unwrap();
        assert_eq!(game.advance().unwrap(), Screen::Playing);
    }
    assert_eq!(game.session().unwrap().aggregate().total_attempts, 25);
    assert_eq!(game.session().unwrap().round_index(), 26);
    assert!(game.summary().is_none());

    game.return_to_menu();
    assert_eq!(game.screen(), Screen::Menu);
}

#[test]
fn early_advance_is_rejected_without_side_effects() {
    let (mut game, _, _) = game();
    game.start_session(Mode::Challenge { rounds: 5 }).unwrap();

    let err = game.advance().unwrap_err();
    assert!(matches!(err, SessionError::InvalidState { .. }));
    let session = game.session().unwrap();
    assert_eq!(session.round_index(), 1);
    assert_eq!(session.aggregate().total_attempts, 0);
    assert_eq!(game.screen(), Screen::Playing);
}

#[test]
fn time_attack_counts_guesses_until_expiry() {
    let (mut game, clock, countdown) = game();
    game.start_session(Mode::TimeAttack { duration_secs: 30 }).unwrap();

    for expected_round in 2..=4 {
        clock.advance_secs(3);
        game.record_guess(Weekday::Sat).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.last_outcome, None);
        assert_eq!(snapshot.round.unwrap().index, expected_round);
        assert_eq!(snapshot.round.unwrap().correct_weekday, None);
    }
    assert!(game.advance().unwrap_err().is_invalid_state());

    clock.advance_secs(21);
    assert_eq!(countdown.expire_all(), 1);
    assert!(game.poll_timer().unwrap());
    assert_eq!(game.screen(), Screen::Results);

    let summary = game.summary().unwrap();
    assert_eq!(summary.total_attempts(), 3);
    assert_eq!(summary.correct_count(), 2);
    assert_eq!(summary.average_seconds_per_round(), None);
    assert!((summary.total_elapsed_seconds() - 30.0).abs() < 1e-9);
}

#[test]
fn guess_after_pending_expiry_is_rejected() {
    let (mut game, _, countdown) = game();
    game.start_session(Mode::TimeAttack { duration_secs: 10 }).unwrap();
    countdown.expire_all();

    let err = game.record_guess(Weekday::Sat).unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(game.screen(), Screen::Results);
    assert_eq!(game.summary().unwrap().total_attempts(), 0);
}

#[test]
fn stale_expiry_is_ignored() {
    let (mut game, _, _) = game();
    let first = game
        .start_session(Mode::TimeAttack { duration_secs: 10 })
        .unwrap();
    game.return_to_menu();
    let second = game
        .start_session(Mode::TimeAttack { duration_secs: 10 })
        .unwrap();
    assert_ne!(first, second);

    assert!(!game.time_up(first).unwrap());
    assert_eq!(game.screen(), Screen::Playing);
    assert!(game.time_up(second).unwrap());
    assert_eq!(game.screen(), Screen::Results);
    assert!(!game.time_up(second).unwrap());
}

#[test]
fn return_to_menu_twice_is_safe() {
    let (mut game, _, countdown) = game();
    game.start_session(Mode::TimeAttack { duration_secs: 15 }).unwrap();
    game.return_to_menu();
    game.return_to_menu();
    assert_eq!(game.screen(), Screen::Menu);
    assert!(game.session().is_none());
    assert_eq!(countdown.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn tokio_countdown_ends_time_attack() {
    let (clock, _handle) = manual_clock();
    let engine = RoundEngine::new(Box::new(ScriptedDates::new([millennium()]).unwrap()), clock);
    let mut game = GameController::new(engine, Arc::new(TokioCountdown::current()));
    game.start_session(Mode::TimeAttack { duration_secs: 10 }).unwrap();

    tokio::time::sleep(Duration::from_secs(9)).await;
    assert!(!game.poll_timer().unwrap());
    game.record_guess(Weekday::Sat).unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(game.poll_timer().unwrap());
    assert_eq!(game.summary().unwrap().correct_count(), 1);
}

#[tokio::test]
async fn long_name_is_rejected_before_submitting() {
    let (mut game, clock, _) = game();
    play_perfect_challenge(&mut game, &clock, 5);
    let gateway = RecordingGateway::default();

    let err = game
        .save_score(&gateway, "ABCDEFGHIJKLMNOP")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Validation(ScoreError::NameTooLong { len: 16, max: 15 })
    ));
    assert_eq!(gateway.calls(), 0);
    assert_eq!(game.save_state(), SaveState::Unsaved);

    game.save_score(&gateway, "ABCDEFGHIJKLMNO").await.unwrap();
    assert_eq!(game.save_state(), SaveState::Saved);
    let saved = gateway.fetch_scores().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].mode, LeaderboardMode::Challenge5);
    assert_eq!(saved[0].score, 5);
    assert!((saved[0].time - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn wide_characters_count_toward_the_name_limit() {
    let (mut game, clock, _) = game();
    play_perfect_challenge(&mut game, &clock, 5);
    let gateway = RecordingGateway::default();

    let err = game
        .save_score(&gateway, &"\u{1F600}".repeat(15))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Validation(ScoreError::NameTooLong { len: 30, max: 15 })
    ));
    assert_eq!(gateway.calls(), 0);
    assert_eq!(game.save_state(), SaveState::Unsaved);
}

#[tokio::test]
async fn failed_save_can_be_retried_once() {
    let (mut game, clock, _) = game();
    play_perfect_challenge(&mut game, &clock, 10);
    let gateway = RecordingGateway::default();
    gateway.fail.store(true, Ordering::SeqCst);

    let err = game.save_score(&gateway, "Ada").await.unwrap_err();
    assert!(matches!(err, SessionError::Gateway(GatewayError::Server { .. })));
    assert_eq!(game.save_state(), SaveState::Unsaved);

    gateway.fail.store(false, Ordering::SeqCst);
    game.save_score(&gateway, "Ada").await.unwrap();
    assert_eq!(game.save_state(), SaveState::Saved);

    assert!(game.save_score(&gateway, "Ada").await.unwrap_err().is_invalid_state());
    assert_eq!(gateway.calls(), 2);
}

#[test]
fn save_in_progress_rejects_duplicates() {
    let (mut game, clock, _) = game();
    play_perfect_challenge(&mut game, &clock, 5);

    let submission = game.begin_save("Ada").unwrap();
    assert_eq!(submission.score(), 5);
    assert_eq!(game.save_state(), SaveState::Saving);
    assert!(game.begin_save("Ada").unwrap_err().is_invalid_state());

    game.finish_save(Ok(())).unwrap();
    assert_eq!(game.save_state(), SaveState::Saved);
}

#[test]
fn practice_and_time_attack_are_unranked() {
    let (mut game, _, countdown) = game();
    game.start_session(Mode::TimeAttack { duration_secs: 10 }).unwrap();
    countdown.expire_all();
    game.poll_timer().unwrap();

    let err = game.begin_save("Ada").unwrap_err();
    assert!(matches!(err, SessionError::Validation(ScoreError::UnrankedMode(_))));
    assert_eq!(game.save_state(), SaveState::Unsaved);
}
