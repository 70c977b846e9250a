use async_trait::async_trait;
use dayguess_core::model::{ScoreEntry, ScoreSubmission};

use super::LeaderboardGateway;
use crate::error::GatewayError;
use crate::score_service::ScoreService;

/// Leaderboard kept in local storage.
#[derive(Clone, Debug)]
pub struct LocalLeaderboard {
    scores: ScoreService,
}

impl LocalLeaderboard {
    #[must_use]
    pub fn new(scores: ScoreService) -> Self {
        Self { scores }
    }
}

#[async_trait]
impl LeaderboardGateway for LocalLeaderboard {
    async fn fetch_scores(&self) -> Result<Vec<ScoreEntry>, GatewayError> {
        Ok(self.scores.list(None).await?)
    }

    async fn submit_score(&self, submission: &ScoreSubmission) -> Result<(), GatewayError> {
        self.scores.submit(submission).await?;
        Ok(())
    }
}
