use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::score::{PlayerName, ScoreError, ScoreSubmission};
use crate::model::{Mode, RoundOutcome};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("correct answers ({correct}) exceed attempts ({attempts})")]
    CountMismatch { correct: u32, attempts: u32 },

    #[error("elapsed time must be a finite, non-negative number of seconds")]
    InvalidElapsed,
}

//
// ─── AGGREGATE ────────────────────────────────────────────────────────────────
//

/// Running totals for the live session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAggregate {
    pub correct_count: u32,
    pub total_attempts: u32,
    pub total_elapsed_seconds: f64,
}

impl SessionAggregate {
    /// Fold one round outcome into the totals.
    pub fn record(&mut self, outcome: &RoundOutcome) {
        self.total_attempts = self.total_attempts.saturating_add(1);
        if outcome.was_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        self.total_elapsed_seconds += outcome.elapsed_seconds;
    }

    /// Replace the summed round times with the wall-clock session duration.
    pub fn close(&mut self, session_seconds: f64) {
        self.total_elapsed_seconds = session_seconds;
    }
}

//
// ─── RESULT SUMMARY ───────────────────────────────────────────────────────────
//

/// Final statistics for a finished session. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    mode: Mode,
    correct_count: u32,
    total_attempts: u32,
    round_count: Option<u32>,
    total_elapsed_seconds: f64,
    average_seconds_per_round: Option<f64>,
    completed_at: DateTime<Utc>,
}

impl ResultSummary {
    /// Summarise a session's totals.
    ///
    /// Challenge averages over the configured round count, practice over the
    /// attempts actually made, and time attack has no average.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError` when totals are inconsistent.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_aggregate(
        mode: Mode,
        aggregate: &SessionAggregate,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if aggregate.correct_count > aggregate.total_attempts {
            return Err(SummaryError::CountMismatch {
                correct: aggregate.correct_count,
                attempts: aggregate.total_attempts,
            });
        }
        let total = aggregate.total_elapsed_seconds;
        if !total.is_finite() || total < 0.0 {
            return Err(SummaryError::InvalidElapsed);
        }

        let (round_count, average) = match mode {
            Mode::Challenge { rounds } => (
                Some(rounds),
                (rounds > 0).then(|| total / f64::from(rounds)),
            ),
            Mode::Practice => (
                None,
                (aggregate.total_attempts > 0).then(|| total / f64::from(aggregate.total_attempts)),
            ),
            Mode::TimeAttack { .. } => (None, None),
        };

        Ok(Self {
            mode,
            correct_count: aggregate.correct_count,
            total_attempts: aggregate.total_attempts,
            round_count,
            total_elapsed_seconds: total,
            average_seconds_per_round: average,
            completed_at,
        })
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    /// Configured rounds for a challenge; `None` for other modes.
    #[must_use]
    pub fn round_count(&self) -> Option<u32> {
        self.round_count
    }

    #[must_use]
    pub fn total_elapsed_seconds(&self) -> f64 {
        self.total_elapsed_seconds
    }

    #[must_use]
    pub fn average_seconds_per_round(&self) -> Option<f64> {
        self.average_seconds_per_round
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Build the leaderboard entry for this result.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` if the mode has no leaderboard or the name or
    /// values fail validation.
    pub fn to_submission(&self, name: &str) -> Result<ScoreSubmission, ScoreError> {
        let mode = self
            .mode
            .leaderboard_mode()
            .ok_or(ScoreError::UnrankedMode(self.mode))?;
        let name = PlayerName::parse(name)?;
        ScoreSubmission::new(name, mode, self.correct_count, self.total_elapsed_seconds)
    }
}
