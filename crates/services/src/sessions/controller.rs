use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Weekday;
use dayguess_core::model::{Mode, ResultSummary, RoundOutcome, ScoreSubmission, SessionId};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::snapshot::{GameSnapshot, RoundView};
use super::state::{SaveState, Screen, SessionState};
use crate::countdown::{Countdown, CountdownHandle};
use crate::error::{GatewayError, SessionError};
use crate::leaderboard::LeaderboardGateway;
use crate::results::summarize;
use crate::round_engine::RoundEngine;

/// Drives the game: screens, round sequencing, scoring, and the time attack
/// countdown. Exactly one session is live at a time.
///
/// All transitions are synchronous. The countdown reports expiry by sending
/// the session id into a channel that `poll_timer` drains, so an expiry that
/// arrives after the session was left is discarded.
pub struct GameController {
    engine: RoundEngine,
    countdown: Arc<dyn Countdown>,
    screen: Screen,
    session: Option<SessionState>,
    summary: Option<ResultSummary>,
    save_state: SaveState,
    timer: Option<Box<dyn CountdownHandle>>,
    last_session_id: SessionId,
    expiry_tx: UnboundedSender<SessionId>,
    expiry_rx: UnboundedReceiver<SessionId>,
}

impl GameController {
    #[must_use]
    pub fn new(engine: RoundEngine, countdown: Arc<dyn Countdown>) -> Self {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            countdown,
            screen: Screen::Menu,
            session: None,
            summary: None,
            save_state: SaveState::Unsaved,
            timer: None,
            last_session_id: SessionId::new(0),
            expiry_tx,
            expiry_rx,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Final statistics, available on the results screen.
    #[must_use]
    pub fn summary(&self) -> Option<&ResultSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Whole seconds left on the time attack countdown, rounded up.
    #[must_use]
    pub fn seconds_left(&self) -> Option<u32> {
        if self.screen != Screen::Playing {
            return None;
        }
        let session = self.session.as_ref()?;
        let budget = session.mode().time_budget_secs()?;
        let elapsed = self.engine.clock().seconds_since(session.started_at());
        let left = (f64::from(budget) - elapsed).max(0.0).ceil();
        // bounded by `budget`, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let secs = left as u32;
        Some(secs)
    }

    /// Read-only view of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let Some(session) = self.session.as_ref() else {
            return GameSnapshot {
                screen: self.screen,
                ..GameSnapshot::menu()
            };
        };
        GameSnapshot {
            screen: self.screen,
            mode: Some(session.mode()),
            round: session
                .current_round()
                .map(|round| RoundView::new(round, session.mode())),
            aggregate: *session.aggregate(),
            last_outcome: session.last_outcome().copied(),
            seconds_left: self.seconds_left(),
            summary: self.summary.clone(),
            save_state: self.save_state,
        }
    }

    //
    // ─── MENU ─────────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless on the menu.
    pub fn open_setup(&mut self) -> Result<(), SessionError> {
        self.leave_menu_for(Screen::ModeSetup, "open mode setup")
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless on the menu.
    pub fn open_tutorial(&mut self) -> Result<(), SessionError> {
        self.leave_menu_for(Screen::Tutorial, "open the tutorial")
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless on the menu.
    pub fn open_leaderboard(&mut self) -> Result<(), SessionError> {
        self.leave_menu_for(Screen::Leaderboard, "open the leaderboard")
    }

    fn leave_menu_for(&mut self, target: Screen, operation: &'static str) -> Result<(), SessionError> {
        if self.screen != Screen::Menu {
            return Err(SessionError::invalid_state(operation, "only reachable from the menu"));
        }
        tracing::debug!(?target, "leaving menu");
        self.screen = target;
        Ok(())
    }

    //
    // ─── SESSION LIFECYCLE ────────────────────────────────────────────────────
    //

    /// Validate `mode`, reset the totals, and open round 1.
    ///
    /// Time attack sessions also start their countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfig` for bad setup values (the screen
    /// is left unchanged), or `SessionError::InvalidState` when not on the
    /// menu or the setup screen.
    pub fn start_session(&mut self, mode: Mode) -> Result<SessionId, SessionError> {
        if !matches!(self.screen, Screen::Menu | Screen::ModeSetup) {
            return Err(SessionError::invalid_state(
                "start a session",
                "return to the menu first",
            ));
        }
        let mode = mode.validate()?;

        let started_at = self.engine.clock().now();
        let first = self.engine.start_round(1)?;
        let id = self.last_session_id.next();
        self.last_session_id = id;

        self.session = Some(SessionState::new(id, mode, started_at, first));
        self.summary = None;
        self.save_state = SaveState::Unsaved;
        self.screen = Screen::Playing;

        if let Some(secs) = mode.time_budget_secs() {
            self.start_countdown(id, secs);
        }
        tracing::debug!(session = %id, %mode, "session started");
        Ok(id)
    }

    /// Score a guess for the round in play.
    ///
    /// Practice and challenge keep the answered round on screen until
    /// `advance`. Time attack opens the next round straight away and shows
    /// no outcome.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside play (including after a
    /// pending countdown expiry ends the session), or `SessionError::Round`
    /// if the round was already answered.
    pub fn record_guess(&mut self, guess: Weekday) -> Result<RoundOutcome, SessionError> {
        self.poll_timer()?;
        if self.screen != Screen::Playing {
            return Err(SessionError::invalid_state("record a guess", "no round is in play"));
        }
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| SessionError::invalid_state("record a guess", "no session"))?;
        let mode = session.mode();
        let round = session
            .current_round_mut()
            .ok_or_else(|| SessionError::invalid_state("record a guess", "no round is in play"))?;

        let outcome = self.engine.submit_guess(round, mode, guess)?;
        session.record(outcome);
        tracing::debug!(
            session = %session.id(),
            round = session.round_index(),
            correct = outcome.was_correct,
            elapsed = outcome.elapsed_seconds,
            "guess recorded"
        );

        match mode {
            Mode::Practice | Mode::Challenge { .. } => {}
            Mode::TimeAttack { .. } => {
                let next = self.engine.start_round(session.next_round_index())?;
                session.begin_round(next);
            }
        }
        Ok(outcome)
    }

    /// Move past an answered round: the next round, or the results once the
    /// last challenge round is done.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` in time attack, outside play, or
    /// while the current round is unanswered. Totals are left untouched.
    pub fn advance(&mut self) -> Result<Screen, SessionError> {
        if self.screen != Screen::Playing {
            return Err(SessionError::invalid_state("advance", "no round is in play"));
        }
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| SessionError::invalid_state("advance", "no session"))?;
        if matches!(session.mode(), Mode::TimeAttack { .. }) {
            return Err(SessionError::invalid_state(
                "advance",
                "time attack rounds advance on their own",
            ));
        }
        let answered = session.current_round().is_some_and(|round| round.is_finished());
        if !answered {
            return Err(SessionError::invalid_state(
                "advance",
                "the current round has not been answered",
            ));
        }

        let last = session
            .mode()
            .round_limit()
            .is_some_and(|limit| session.round_index() >= limit);
        if last {
            self.finish()?;
        } else {
            let next = self.engine.start_round(session.next_round_index())?;
            session.begin_round(next);
        }
        Ok(self.screen)
    }

    /// Countdown expiry for `id`. Ends that session if it is still in play.
    ///
    /// Returns `Ok(false)` when the expiry is stale and was ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the final totals are inconsistent.
    pub fn time_up(&mut self, id: SessionId) -> Result<bool, SessionError> {
        let live = self.screen == Screen::Playing
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.id() == id && matches!(s.mode(), Mode::TimeAttack { .. }));
        if !live {
            tracing::debug!(session = %id, "ignoring stale countdown expiry");
            return Ok(false);
        }
        tracing::debug!(session = %id, "countdown expired");
        self.finish()?;
        Ok(true)
    }

    /// Apply countdown expiries that have arrived since the last call.
    ///
    /// Returns `Ok(true)` if one of them ended the session.
    ///
    /// # Errors
    ///
    /// Propagates errors from `time_up`.
    pub fn poll_timer(&mut self) -> Result<bool, SessionError> {
        let mut ended = false;
        while let Ok(id) = self.expiry_rx.try_recv() {
            ended |= self.time_up(id)?;
        }
        Ok(ended)
    }

    /// Discard any session and go back to the menu. Safe to repeat.
    pub fn return_to_menu(&mut self) {
        self.stop_countdown();
        while self.expiry_rx.try_recv().is_ok() {}
        if let Some(session) = self.session.take() {
            tracing::debug!(session = %session.id(), "session discarded");
        }
        self.summary = None;
        self.save_state = SaveState::Unsaved;
        self.screen = Screen::Menu;
    }

    fn finish(&mut self) -> Result<(), SessionError> {
        self.stop_countdown();
        let now = self.engine.clock().now();
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| SessionError::invalid_state("finish", "no session"))?;
        let seconds = self.engine.clock().seconds_since(session.started_at());
        session.end(now, seconds);

        let summary = summarize(session)?;
        tracing::info!(
            session = %session.id(),
            mode = %summary.mode(),
            correct = summary.correct_count(),
            attempts = summary.total_attempts(),
            seconds = summary.total_elapsed_seconds(),
            "session finished"
        );
        self.summary = Some(summary);
        self.save_state = SaveState::Unsaved;
        self.screen = Screen::Results;
        Ok(())
    }

    //
    // ─── COUNTDOWN ────────────────────────────────────────────────────────────
    //

    fn start_countdown(&mut self, id: SessionId, secs: u32) {
        self.stop_countdown();
        let tx = self.expiry_tx.clone();
        let handle = self.countdown.start(
            Duration::from_secs(u64::from(secs)),
            Box::new(move || {
                if tx.send(id).is_err() {
                    tracing::debug!(session = %id, "countdown expired after controller was dropped");
                }
            }),
        );
        self.timer = Some(handle);
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.cancel();
        }
    }

    //
    // ─── LEADERBOARD ──────────────────────────────────────────────────────────
    //

    /// Validate the finished result for submission and mark it as saving.
    ///
    /// Nothing is sent; the caller submits the returned entry and reports
    /// back through `finish_save`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` off the results screen or when a
    /// save is in progress or done, and `SessionError::Validation` for a bad
    /// name or an unranked mode (the result stays unsaved).
    pub fn begin_save(&mut self, name: &str) -> Result<ScoreSubmission, SessionError> {
        if self.screen != Screen::Results {
            return Err(SessionError::invalid_state("save a score", "the session has not finished"));
        }
        match self.save_state {
            SaveState::Unsaved => {}
            SaveState::Saving => {
                return Err(SessionError::invalid_state("save a score", "a save is already in progress"));
            }
            SaveState::Saved => {
                return Err(SessionError::invalid_state("save a score", "this result is already saved"));
            }
        }
        let summary = self
            .summary
            .as_ref()
            .ok_or_else(|| SessionError::invalid_state("save a score", "no result"))?;

        let submission = summary.to_submission(name)?;
        self.save_state = SaveState::Saving;
        Ok(submission)
    }

    /// Record how the submission started by `begin_save` went.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` if no save is in progress, or the
    /// gateway's error (the result returns to unsaved so it can be retried).
    pub fn finish_save(&mut self, result: Result<(), GatewayError>) -> Result<(), SessionError> {
        if self.save_state != SaveState::Saving {
            return Err(SessionError::invalid_state("finish a save", "no save is in progress"));
        }
        match result {
            Ok(()) => {
                self.save_state = SaveState::Saved;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "score submission failed");
                self.save_state = SaveState::Unsaved;
                Err(err.into())
            }
        }
    }

    /// Submit the finished result to `gateway` under `name`.
    ///
    /// # Errors
    ///
    /// See `begin_save` and `finish_save`.
    pub async fn save_score(
        &mut self,
        gateway: &dyn LeaderboardGateway,
        name: &str,
    ) -> Result<(), SessionError> {
        let submission = self.begin_save(name)?;
        let result = gateway.submit_score(&submission).await;
        self.finish_save(result)
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}

impl fmt::Debug for GameController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameController")
            .field("screen", &self.screen)
            .field("session", &self.session)
            .field("save_state", &self.save_state)
            .field("timer_running", &self.timer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::ManualCountdown;
    use crate::dates::ScriptedDates;
    use chrono::NaiveDate;
    use dayguess_core::ManualClock;
    use dayguess_core::model::ModeError;
    use dayguess_core::time::manual_clock;

    fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }

    fn controller() -> (GameController, ManualClock, Arc<ManualCountdown>) {
        let (clock, handle) = manual_clock();
        let engine = RoundEngine::new(Box::new(ScriptedDates::new([saturday()]).unwrap()), clock);
        let countdown = Arc::new(ManualCountdown::new());
        (GameController::new(engine, countdown.clone()), handle, countdown)
    }

    #[test]
    fn side_screens_open_only_from_menu() {
        let (mut game, _, _) = controller();
        game.open_tutorial().unwrap();
        assert_eq!(game.screen(), Screen::Tutorial);
        assert!(game.open_leaderboard().unwrap_err().is_invalid_state());
        game.return_to_menu();
        game.open_setup().unwrap();
        assert_eq!(game.screen(), Screen::ModeSetup);
    }

    #[test]
    fn invalid_mode_keeps_setup_screen() {
        let (mut game, _, countdown) = controller();
        game.open_setup().unwrap();
        let err = game
            .start_session(Mode::TimeAttack { duration_secs: 5 })
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidConfig(ModeError::DurationTooShort { .. })
        ));
        assert_eq!(game.screen(), Screen::ModeSetup);
        assert!(game.session().is_none());
        assert!(countdown.started().is_empty());
    }

    #[test]
    fn guess_reveals_outcome_until_advance() {
        let (mut game, clock, _) = controller();
        game.start_session(Mode::Challenge { rounds: 2 }).unwrap();
        clock.advance_millis(1_500);

        let outcome = game.record_guess(Weekday::Sat).unwrap();
        assert!(outcome.was_correct);
        assert!((outcome.elapsed_seconds - 1.5).abs() < 1e-9);

        let snapshot = game.snapshot();
        assert!(snapshot.is_showing_outcome());
        let round = snapshot.round.unwrap();
        assert_eq!(round.correct_weekday, Some(Weekday::Sat));
        assert!(!round.is_last());

        assert!(game.record_guess(Weekday::Sun).unwrap_err().is_invalid_state());
        assert_eq!(game.session().unwrap().aggregate().total_attempts, 1);

        assert_eq!(game.advance().unwrap(), Screen::Playing);
        let snapshot = game.snapshot();
        assert!(!snapshot.is_showing_outcome());
        assert_eq!(snapshot.round.unwrap().correct_weekday, None);
        assert!(snapshot.round.unwrap().is_last());
    }

    #[test]
    fn time_attack_reports_seconds_left_rounded_up() {
        let (mut game, clock, countdown) = controller();
        game.start_session(Mode::TimeAttack { duration_secs: 30 }).unwrap();
        assert_eq!(countdown.started(), [Duration::from_secs(30)]);
        assert_eq!(game.seconds_left(), Some(30));

        clock.advance_millis(10_200);
        assert_eq!(game.seconds_left(), Some(20));

        clock.advance_secs(60);
        assert_eq!(game.seconds_left(), Some(0));
    }

    #[test]
    fn leaving_time_attack_cancels_countdown() {
        let (mut game, _, countdown) = controller();
        game.start_session(Mode::TimeAttack { duration_secs: 10 }).unwrap();
        game.return_to_menu();
        assert_eq!(countdown.cancelled_count(), 1);
        assert_eq!(countdown.expire_all(), 0);
        assert!(!game.poll_timer().unwrap());
        assert_eq!(game.snapshot(), GameSnapshot::menu());
    }

    #[test]
    fn save_requires_results_screen() {
        let (mut game, _, _) = controller();
        game.start_session(Mode::Challenge { rounds: 5 }).unwrap();
        let err = game.begin_save("Ada").unwrap_err();
        assert!(err.is_invalid_state());
        assert!(game.finish_save(Ok(())).unwrap_err().is_invalid_state());
    }

    #[test]
    fn practice_results_are_not_submittable() {
        let (mut game, _, _) = controller();
        game.start_session(Mode::Practice).unwrap();
        game.record_guess(Weekday::Mon).unwrap();
        assert!(game.advance().is_ok());
        assert_eq!(game.screen(), Screen::Playing);
        assert!(game.summary().is_none());
    }
}
