use std::time::Duration;

use async_trait::async_trait;
use dayguess_core::model::{
    LeaderboardMode, LeaderboardSettings, ScoreEntry, ScoreSubmission, sort_by_rank,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::LeaderboardGateway;
use crate::error::{ConfigError, GatewayError};

/// Leaderboard served over HTTP at `{base}/api/scores`.
#[derive(Clone, Debug)]
pub struct HttpLeaderboard {
    client: Client,
    endpoint: String,
}

impl HttpLeaderboard {
    /// # Errors
    ///
    /// Returns `ConfigError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}/api/scores", base_url.as_str().trim_end_matches('/'));
        Ok(Self { client, endpoint })
    }

    /// Build a client for the remote leaderboard, or `None` when `settings`
    /// keep scores local.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Http` if the HTTP client cannot be built.
    pub fn from_settings(settings: &LeaderboardSettings) -> Result<Option<Self>, ConfigError> {
        settings
            .base_url()
            .map(|url| Self::new(url, Duration::from_secs(settings.timeout_secs())))
            .transpose()
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeaderboardGateway for HttpLeaderboard {
    async fn fetch_scores(&self) -> Result<Vec<ScoreEntry>, GatewayError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response.text().await.unwrap_or_default());
            return Err(GatewayError::Server { status, message });
        }

        let rows: Vec<WireRow> = response.json().await?;
        let mut entries: Vec<ScoreEntry> = rows.into_iter().filter_map(WireRow::into_entry).collect();
        sort_by_rank(&mut entries);
        Ok(entries)
    }

    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = error_message(response.text().await.unwrap_or_default());
        if status == StatusCode::BAD_REQUEST {
            Err(GatewayError::Validation(message))
        } else {
            Err(GatewayError::Server { status, message })
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireRow {
    name: String,
    mode: String,
    score: u32,
    time: f64,
}

impl WireRow {
    fn into_entry(self) -> Option<ScoreEntry> {
        let Ok(mode) = self.mode.parse::<LeaderboardMode>() else {
            tracing::debug!(mode = %self.mode, "skipping score with unranked mode");
            return None;
        };
        Some(ScoreEntry {
            name: self.name,
            mode,
            score: self.score,
            time: self.time,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pull `message` or `error` out of a JSON error body, falling back to the raw text.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        })
        | Ok(ErrorBody {
            error: Some(message),
            ..
        }) => message,
        _ => body,
    }
}
