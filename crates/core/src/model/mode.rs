use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest time attack a player may configure.
pub const MIN_TIME_ATTACK_SECS: u32 = 10;

/// Time attack durations move in steps of this many seconds.
pub const TIME_ATTACK_STEP_SECS: u32 = 5;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModeError {
    #[error("a challenge needs at least one round")]
    NoRounds,

    #[error("time attack must last at least {min} seconds (got {secs})")]
    DurationTooShort { secs: u32, min: u32 },

    #[error("time attack duration must be a multiple of {step} seconds (got {secs})")]
    DurationNotStepped { secs: u32, step: u32 },

    #[error("unknown leaderboard mode: {0}")]
    UnknownLeaderboardMode(String),
}

//
// ─── MODE ─────────────────────────────────────────────────────────────────────
//

/// How a session is played. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// Untimed, unlimited rounds. Never ends on its own.
    Practice,
    /// A fixed number of rounds with the outcome shown after each guess.
    Challenge { rounds: u32 },
    /// As many rounds as fit in the time budget; rounds advance immediately.
    TimeAttack { duration_secs: u32 },
}

impl Mode {
    #[must_use]
    pub fn challenge(rounds: u32) -> Self {
        Self::Challenge { rounds }
    }

    #[must_use]
    pub fn time_attack(duration_secs: u32) -> Self {
        Self::TimeAttack { duration_secs }
    }

    /// Check the setup values a player chose for this mode.
    ///
    /// # Errors
    ///
    /// Returns `ModeError` when a challenge has no rounds or a time attack is
    /// shorter than ten seconds or not a multiple of five.
    pub fn validate(self) -> Result<Self, ModeError> {
        match self {
            Mode::Practice => Ok(self),
            Mode::Challenge { rounds } => {
                if rounds == 0 {
                    return Err(ModeError::NoRounds);
                }
                Ok(self)
            }
            Mode::TimeAttack { duration_secs } => {
                if duration_secs < MIN_TIME_ATTACK_SECS {
                    return Err(ModeError::DurationTooShort {
                        secs: duration_secs,
                        min: MIN_TIME_ATTACK_SECS,
                    });
                }
                if duration_secs % TIME_ATTACK_STEP_SECS != 0 {
                    return Err(ModeError::DurationNotStepped {
                        secs: duration_secs,
                        step: TIME_ATTACK_STEP_SECS,
                    });
                }
                Ok(self)
            }
        }
    }

    /// Number of rounds after which the session ends, if any.
    #[must_use]
    pub fn round_limit(self) -> Option<u32> {
        match self {
            Mode::Challenge { rounds } => Some(rounds),
            Mode::Practice | Mode::TimeAttack { .. } => None,
        }
    }

    /// Countdown length for timed sessions.
    #[must_use]
    pub fn time_budget_secs(self) -> Option<u32> {
        match self {
            Mode::TimeAttack { duration_secs } => Some(duration_secs),
            Mode::Practice | Mode::Challenge { .. } => None,
        }
    }

    /// Whether the round outcome stays on screen until the player advances.
    #[must_use]
    pub fn shows_outcome(self) -> bool {
        match self {
            Mode::Practice | Mode::Challenge { .. } => true,
            Mode::TimeAttack { .. } => false,
        }
    }

    /// Leaderboard bucket for this mode, when it has one.
    #[must_use]
    pub fn leaderboard_mode(self) -> Option<LeaderboardMode> {
        match self {
            Mode::Challenge { rounds: 5 } => Some(LeaderboardMode::Challenge5),
            Mode::Challenge { rounds: 10 } => Some(LeaderboardMode::Challenge10),
            Mode::Challenge { .. } | Mode::Practice | Mode::TimeAttack { .. } => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Practice => write!(f, "Practice"),
            Mode::Challenge { rounds } => write!(f, "{rounds}-Date Challenge"),
            Mode::TimeAttack { duration_secs } => write!(f, "{duration_secs}s Time Attack"),
        }
    }
}

//
// ─── LEADERBOARD MODE ────────────────────────────────────────────────────────
//

/// The only modes the leaderboard accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeaderboardMode {
    #[serde(rename = "challenge_5")]
    Challenge5,
    #[serde(rename = "challenge_10")]
    Challenge10,
}

impl LeaderboardMode {
    pub const ALL: [LeaderboardMode; 2] = [LeaderboardMode::Challenge5, LeaderboardMode::Challenge10];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardMode::Challenge5 => "challenge_5",
            LeaderboardMode::Challenge10 => "challenge_10",
        }
    }

    #[must_use]
    pub fn rounds(self) -> u32 {
        match self {
            LeaderboardMode::Challenge5 => 5,
            LeaderboardMode::Challenge10 => 10,
        }
    }

    #[must_use]
    pub fn mode(self) -> Mode {
        Mode::challenge(self.rounds())
    }
}

impl fmt::Display for LeaderboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "challenge_5" => Ok(Self::Challenge5),
            "challenge_10" => Ok(Self::Challenge10),
            other => Err(ModeError::UnknownLeaderboardMode(other.to_string())),
        }
    }
}
