//! Publishing and reading leaderboard scores.

mod http;
mod local;

use std::env;

use async_trait::async_trait;
use dayguess_core::model::{LeaderboardSettings, LeaderboardSettingsDraft, ScoreEntry, ScoreSubmission};

use crate::error::{ConfigError, GatewayError};

pub use http::HttpLeaderboard;
pub use local::LocalLeaderboard;

pub const URL_VAR: &str = "DAYGUESS_LEADERBOARD_URL";
pub const TIMEOUT_VAR: &str = "DAYGUESS_LEADERBOARD_TIMEOUT_SECS";

/// Request/response contract with the leaderboard.
#[async_trait]
pub trait LeaderboardGateway: Send + Sync {
    /// All scores, best first: most correct answers, then fastest time.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the leaderboard cannot be read.
    async fn fetch_scores(&self) -> Result<Vec<ScoreEntry>, GatewayError>;

    /// Publish one score.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Validation` when the leaderboard rejects the
    /// entry, or another `GatewayError` when it cannot be reached.
    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), GatewayError>;
}

/// Read leaderboard settings from the environment.
///
/// # Errors
///
/// Returns `ConfigError` for an unparsable timeout or an invalid URL.
pub fn settings_from_env() -> Result<LeaderboardSettings, ConfigError> {
    let timeout_secs = match env::var(TIMEOUT_VAR) {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidVar {
                    var: TIMEOUT_VAR,
                    raw: raw.clone(),
                })?,
        ),
        Err(_) => None,
    };
    let draft = LeaderboardSettingsDraft {
        base_url: env::var(URL_VAR).ok(),
        timeout_secs,
    };
    Ok(draft.validate()?)
}
