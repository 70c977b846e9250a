//! Shared error types for the services crate.

use thiserror::Error;

use dayguess_core::model::{ModeError, RoundError, ScoreError, SettingsError, SummaryError};
use storage::repository::StorageError;

/// Errors emitted by a `LeaderboardGateway`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("leaderboard rejected the score: {0}")]
    Validation(String),
    #[error("leaderboard failed with status {status}: {message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ScoreService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoreServiceError {
    #[error(transparent)]
    Invalid(#[from] ScoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ScoreServiceError> for GatewayError {
    fn from(err: ScoreServiceError) -> Self {
        match err {
            ScoreServiceError::Invalid(e) => GatewayError::Validation(e.to_string()),
            ScoreServiceError::Storage(e) => GatewayError::Storage(e),
        }
    }
}

/// Errors emitted by the game session controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    InvalidConfig(#[from] ModeError),
    #[error("cannot {operation}: {reason}")]
    InvalidState {
        operation: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Validation(#[from] ScoreError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SessionError {
    pub(crate) fn invalid_state(operation: &'static str, reason: &'static str) -> Self {
        tracing::warn!(operation, reason, "rejected session transition");
        Self::InvalidState { operation, reason }
    }

    /// True for misuse of the controller rather than player or network errors.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidState { .. } | SessionError::Round(RoundError::AlreadyFinished { .. })
        )
    }
}

/// Errors emitted while loading leaderboard configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {var}: {raw}")]
    InvalidVar { var: &'static str, raw: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
