use std::sync::Arc;

use dayguess_core::model::{
    LeaderboardMode, PlayerName, ScoreEntry, ScoreError, ScoreId, ScoreSubmission,
};
use serde::Deserialize;
use storage::repository::ScoreRepository;

use crate::Clock;
use crate::error::ScoreServiceError;

/// Most rows returned by a leaderboard listing.
pub const MAX_LISTED_SCORES: u32 = 1_000;

/// Score as posted by a client, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRequest {
    pub name: Option<String>,
    pub mode: Option<String>,
    pub score: Option<i64>,
    pub time: Option<f64>,
}

impl ScoreRequest {
    /// # Errors
    ///
    /// Returns `ScoreError` for missing fields, a bad name, a mode outside the
    /// leaderboard allowlist, or out-of-range values.
    pub fn validate(self) -> Result<ScoreSubmission, ScoreError> {
        let name = self.name.ok_or(ScoreError::MissingField("name"))?;
        let mode = self.mode.ok_or(ScoreError::MissingField("mode"))?;
        let score = self.score.ok_or(ScoreError::MissingField("score"))?;
        let time = self.time.ok_or(ScoreError::MissingField("time"))?;

        let name = PlayerName::parse(&name)?;
        let mode: LeaderboardMode = mode.parse().map_err(|_| ScoreError::UnknownMode(mode))?;
        let score = u32::try_from(score).map_err(|_| ScoreError::NegativeScore(score))?;
        ScoreSubmission::new(name, mode, score, time)
    }
}

/// Accepts and lists leaderboard scores on top of a `ScoreRepository`.
#[derive(Clone)]
pub struct ScoreService {
    clock: Clock,
    repo: Arc<dyn ScoreRepository>,
}

impl ScoreService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ScoreRepository>) -> Self {
        Self { clock, repo }
    }

    /// Store a validated score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreServiceError::Storage` if persistence fails.
    pub async fn submit(&self, submission: &ScoreSubmission) -> Result<ScoreId, ScoreServiceError> {
        let id = self.repo.append_score(submission, self.clock.now()).await?;
        tracing::info!(
            id = %id,
            mode = %submission.mode(),
            score = submission.score(),
            time = submission.time_secs(),
            "score saved"
        );
        Ok(id)
    }

    /// Validate a raw request and store it.
    ///
    /// # Errors
    ///
    /// Returns `ScoreServiceError::Invalid` for rejected requests or
    /// `ScoreServiceError::Storage` if persistence fails.
    pub async fn submit_request(&self, request: ScoreRequest) -> Result<ScoreId, ScoreServiceError> {
        let submission = request.validate()?;
        self.submit(&submission).await
    }

    /// Scores in leaderboard order, optionally for a single mode.
    ///
    /// # Errors
    ///
    /// Returns `ScoreServiceError::Storage` if rows cannot be read.
    pub async fn list(
        &self,
        mode: Option<LeaderboardMode>,
    ) -> Result<Vec<ScoreEntry>, ScoreServiceError> {
        let rows = self.repo.list_scores(mode, MAX_LISTED_SCORES).await?;
        Ok(rows.into_iter().map(|row| row.entry).collect())
    }
}

impl std::fmt::Debug for ScoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayguess_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn request(name: &str, mode: &str, score: i64, time: f64) -> ScoreRequest {
        ScoreRequest {
            name: Some(name.into()),
            mode: Some(mode.into()),
            score: Some(score),
            time: Some(time),
        }
    }

    #[test]
    fn request_requires_every_field() {
        let err = ScoreRequest {
            name: Some("Ada".into()),
            mode: Some("challenge_5".into()),
            score: None,
            time: Some(1.0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, ScoreError::MissingField("score"));
    }

    #[test]
    fn request_rejects_modes_outside_allowlist() {
        let err = request("Ada", "practice", 3, 1.0).validate().unwrap_err();
        assert_eq!(err, ScoreError::UnknownMode("practice".into()));
    }

    #[test]
    fn request_rejects_negative_score_and_long_name() {
        assert_eq!(
            request("Ada", "challenge_5", -1, 1.0).validate().unwrap_err(),
            ScoreError::NegativeScore(-1)
        );
        assert!(matches!(
            request("ABCDEFGHIJKLMNOP", "challenge_5", 1, 1.0)
                .validate()
                .unwrap_err(),
            ScoreError::NameTooLong { len: 16, .. }
        ));
    }

    #[tokio::test]
    async fn submitted_scores_are_listed_in_rank_order() {
        let service = ScoreService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        service
            .submit_request(request("bob", "challenge_5", 3, 20.0))
            .await
            .unwrap();
        service
            .submit_request(request("ada", "challenge_5", 5, 35.0))
            .await
            .unwrap();
        service
            .submit_request(request("cy", "challenge_10", 8, 50.0))
            .await
            .unwrap();

        let five = service.list(Some(LeaderboardMode::Challenge5)).await.unwrap();
        let names: Vec<_> = five.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["ada", "bob"]);
        assert_eq!(service.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn invalid_requests_are_not_stored() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = ScoreService::new(fixed_clock(), repo.clone());
        let err = service
            .submit_request(request("", "challenge_5", 1, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoreServiceError::Invalid(ScoreError::EmptyName)));
        assert!(repo.list_scores(None, 10).await.unwrap().is_empty());
    }
}
