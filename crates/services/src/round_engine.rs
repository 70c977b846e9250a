use chrono::Weekday;
use dayguess_core::model::{Mode, Round, RoundOutcome};

use crate::dates::{DateGenerator, RandomDates};
use crate::error::SessionError;
use crate::Clock;

/// Opens rounds and scores guesses against them.
///
/// Owns the date source and the clock, so correctness and round timing are
/// computed here and nowhere else.
pub struct RoundEngine {
    dates: Box<dyn DateGenerator>,
    clock: Clock,
}

impl RoundEngine {
    #[must_use]
    pub fn new(dates: Box<dyn DateGenerator>, clock: Clock) -> Self {
        Self { dates, clock }
    }

    /// Random dates on the system clock.
    #[must_use]
    pub fn system() -> Self {
        Self::new(Box::new(RandomDates::new()), Clock::default_clock())
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Draw a date and open round `index`, timed from now.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Round` if the date source yields a date
    /// outside the playable range.
    pub fn start_round(&mut self, index: u32) -> Result<Round, SessionError> {
        let date = self.dates.generate();
        Ok(Round::new(index, date, self.clock.now())?)
    }

    /// Score `guess` against `round` and close it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Round` when the round was already answered,
    /// except in time attack, which skips that check.
    pub fn submit_guess(
        &self,
        round: &mut Round,
        mode: Mode,
        guess: Weekday,
    ) -> Result<RoundOutcome, SessionError> {
        Ok(round.record_guess(mode, guess, self.clock.now())?)
    }
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ScriptedDates;
    use chrono::NaiveDate;
    use dayguess_core::model::RoundError;
    use dayguess_core::time::{fixed_now, manual_clock};

    #[test]
    fn start_round_uses_generator_and_clock() {
        let date = NaiveDate::from_ymd_opt(1969, 7, 20).unwrap();
        let (clock, _handle) = manual_clock();
        let mut engine = RoundEngine::new(Box::new(ScriptedDates::new([date]).unwrap()), clock);

        let round = engine.start_round(3).unwrap();
        assert_eq!(round.index(), 3);
        assert_eq!(round.date(), date);
        assert_eq!(round.correct_weekday(), Weekday::Sun);
        assert_eq!(round.started_at(), fixed_now());
        assert!(!round.is_finished());
    }

    #[test]
    fn submit_guess_measures_time_from_round_start() {
        let date = NaiveDate::from_ymd_opt(1969, 7, 20).unwrap();
        let (clock, handle) = manual_clock();
        let mut engine = RoundEngine::new(Box::new(ScriptedDates::new([date]).unwrap()), clock);
        let mut round = engine.start_round(1).unwrap();

        handle.advance_millis(4_200);
        let outcome = engine
            .submit_guess(&mut round, Mode::Practice, Weekday::Sun)
            .unwrap();
        assert!(outcome.was_correct);
        assert_eq!(outcome.elapsed_seconds, 4.2);

        let err = engine
            .submit_guess(&mut round, Mode::Practice, Weekday::Sun)
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Round(RoundError::AlreadyFinished { index: 1 })
        ));
        assert!(err.is_invalid_state());
    }
}
