use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::calendar::in_range;
use crate::model::Mode;
use crate::time::elapsed_seconds;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("round {index} has already been answered")]
    AlreadyFinished { index: u32 },

    #[error("date {0} is outside the playable range")]
    OutOfRange(NaiveDate),
}

//
// ─── OUTCOME ──────────────────────────────────────────────────────────────────
//

/// Result of a single guess. Produced only by `Round::record_guess`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub guess: Weekday,
    pub correct_weekday: Weekday,
    pub was_correct: bool,
    pub elapsed_seconds: f64,
}

//
// ─── ROUND ────────────────────────────────────────────────────────────────────
//

/// One date shown to the player and the guess made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    index: u32,
    date: NaiveDate,
    correct_weekday: Weekday,
    started_at: DateTime<Utc>,
    guess: Option<Weekday>,
    is_finished: bool,
}

impl Round {
    /// Open a round for `date`, awaiting a guess.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::OutOfRange` for dates outside 1900-2100.
    pub fn new(index: u32, date: NaiveDate, started_at: DateTime<Utc>) -> Result<Self, RoundError> {
        if !in_range(date) {
            return Err(RoundError::OutOfRange(date));
        }
        Ok(Self {
            index,
            date,
            correct_weekday: date.weekday(),
            started_at,
            guess: None,
            is_finished: false,
        })
    }

    /// 1-based position of this round in its session.
    #[must_use]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn correct_weekday(&self) -> Weekday {
        self.correct_weekday
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn guess(&self) -> Option<Weekday> {
        self.guess
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Score a guess against this round and close it.
    ///
    /// A finished round rejects further guesses, except in time attack: those
    /// rounds are replaced as soon as they are answered, so the guard is not
    /// applied for that mode. The relaxation is specific to time attack.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::AlreadyFinished` when the round was already answered
    /// outside time attack.
    pub fn record_guess(
        &mut self,
        mode: Mode,
        guess: Weekday,
        now: DateTime<Utc>,
    ) -> Result<RoundOutcome, RoundError> {
        let guarded = !matches!(mode, Mode::TimeAttack { .. });
        if guarded && self.is_finished {
            return Err(RoundError::AlreadyFinished { index: self.index });
        }

        self.guess = Some(guess);
        self.is_finished = true;

        Ok(RoundOutcome {
            guess,
            correct_weekday: self.correct_weekday,
            was_correct: guess == self.correct_weekday,
            elapsed_seconds: elapsed_seconds(self.started_at, now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn y2k_round() -> Round {
        // Saturday
        Round::new(1, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), fixed_now()).unwrap()
    }

    #[test]
    fn correct_guess_is_scored_and_timed() {
        let mut round = y2k_round();
        let outcome = round
            .record_guess(
                Mode::challenge(5),
                Weekday::Sat,
                fixed_now() + Duration::milliseconds(2_250),
            )
            .unwrap();

        assert!(outcome.was_correct);
        assert_eq!(outcome.correct_weekday, Weekday::Sat);
        assert_eq!(outcome.elapsed_seconds, 2.25);
        assert!(round.is_finished());
        assert_eq!(round.guess(), Some(Weekday::Sat));
    }

    #[test]
    fn wrong_guess_reports_correct_day() {
        let mut round = y2k_round();
        let outcome = round
            .record_guess(Mode::Practice, Weekday::Mon, fixed_now())
            .unwrap();
        assert!(!outcome.was_correct);
        assert_eq!(outcome.correct_weekday, Weekday::Sat);
    }

    #[test]
    fn finished_round_rejects_second_guess() {
        let mut round = y2k_round();
        round
            .record_guess(Mode::challenge(5), Weekday::Mon, fixed_now())
            .unwrap();
        let err = round
            .record_guess(Mode::challenge(5), Weekday::Sat, fixed_now())
            .unwrap_err();
        assert_eq!(err, RoundError::AlreadyFinished { index: 1 });
        assert_eq!(round.guess(), Some(Weekday::Mon));
    }

    #[test]
    fn time_attack_skips_finished_guard() {
        let mut round = y2k_round();
        let mode = Mode::time_attack(30);
        round.record_guess(mode, Weekday::Mon, fixed_now()).unwrap();
        let again = round.record_guess(mode, Weekday::Sat, fixed_now()).unwrap();
        assert!(again.was_correct);
    }

    #[test]
    fn rejects_dates_outside_range() {
        let date = NaiveDate::from_ymd_opt(1899, 12, 31).unwrap();
        assert_eq!(
            Round::new(1, date, fixed_now()).unwrap_err(),
            RoundError::OutOfRange(date)
        );
    }
}
