use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LeaderboardMode, Mode};

/// Longest name the leaderboard stores, in UTF-16 code units (the unit the
/// leaderboard server measures in).
pub const MAX_NAME_LEN: usize = 15;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Local checks applied before a score reaches the leaderboard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name is too long: {len} UTF-16 units (max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("{0} results are not ranked")]
    UnrankedMode(Mode),

    #[error("score {score} exceeds the {rounds} rounds of {mode}")]
    ScoreTooHigh {
        score: u32,
        rounds: u32,
        mode: LeaderboardMode,
    },

    #[error("time must be a finite, non-negative number of seconds")]
    InvalidTime,

    #[error("score must not be negative (got {0})")]
    NegativeScore(i64),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid game mode for leaderboard: {0}")]
    UnknownMode(String),
}

//
// ─── PLAYER NAME ──────────────────────────────────────────────────────────────
//

/// A trimmed, non-empty name of at most 15 UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyName` or `ScoreError::NameTooLong`.
    pub fn parse(raw: &str) -> Result<Self, ScoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScoreError::EmptyName);
        }
        let len = trimmed.encode_utf16().count();
        if len > MAX_NAME_LEN {
            return Err(ScoreError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = ScoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── SUBMISSION ───────────────────────────────────────────────────────────────
//

/// A validated score ready to send to the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSubmission {
    name: PlayerName,
    mode: LeaderboardMode,
    score: u32,
    #[serde(rename = "time")]
    time_secs: f64,
}

impl ScoreSubmission {
    /// # Errors
    ///
    /// Returns `ScoreError` when the score exceeds the mode's rounds or the
    /// time is negative or not finite.
    pub fn new(
        name: PlayerName,
        mode: LeaderboardMode,
        score: u32,
        time_secs: f64,
    ) -> Result<Self, ScoreError> {
        if score > mode.rounds() {
            return Err(ScoreError::ScoreTooHigh {
                score,
                rounds: mode.rounds(),
                mode,
            });
        }
        if !time_secs.is_finite() || time_secs < 0.0 {
            return Err(ScoreError::InvalidTime);
        }
        Ok(Self {
            name,
            mode,
            score,
            time_secs,
        })
    }

    #[must_use]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }

    #[must_use]
    pub fn mode(&self) -> LeaderboardMode {
        self.mode
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    #[must_use]
    pub fn to_entry(&self) -> ScoreEntry {
        ScoreEntry {
            name: self.name.to_string(),
            mode: self.mode,
            score: self.score,
            time: self.time_secs,
        }
    }
}

//
// ─── ENTRY ────────────────────────────────────────────────────────────────────
//

/// A row of the leaderboard as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub mode: LeaderboardMode,
    pub score: u32,
    pub time: f64,
}

impl ScoreEntry {
    /// Leaderboard order: more correct answers first, then faster times.
    #[must_use]
    pub fn ranking_order(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.time.total_cmp(&other.time))
    }

    /// True when `self` sits strictly below `previous` in the ranking.
    #[must_use]
    pub fn ranks_below(&self, previous: &Self) -> bool {
        self.ranking_order(previous) == Ordering::Greater
    }
}

/// Sort entries into leaderboard order. Stable, so equal entries keep
/// their insertion order.
pub fn sort_by_rank(entries: &mut [ScoreEntry]) {
    entries.sort_by(ScoreEntry::ranking_order);
}
