use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dayguess_core::model::{LeaderboardMode, ScoreEntry, ScoreId, ScoreSubmission};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a leaderboard score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub entry: ScoreEntry,
    pub created_at: DateTime<Utc>,
}

/// Repository contract for leaderboard scores.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Store a validated score.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the score cannot be stored.
    async fn append_score(
        &self,
        submission: &ScoreSubmission,
        created_at: DateTime<Utc>,
    ) -> Result<ScoreId, StorageError>;

    /// List scores in leaderboard order: score descending, time ascending,
    /// then insertion order. `mode: None` lists every mode.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if rows cannot be read or decoded.
    async fn list_scores(
        &self,
        mode: Option<LeaderboardMode>,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    scores: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn append_score(
        &self,
        submission: &ScoreSubmission,
        created_at: DateTime<Utc>,
    ) -> Result<ScoreId, StorageError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let next = i64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("score id overflow".into()))?
            + 1;
        let id = ScoreId::new(next);
        guard.push(ScoreRecord {
            id,
            entry: submission.to_entry(),
            created_at,
        });
        Ok(id)
    }

    async fn list_scores(
        &self,
        mode: Option<LeaderboardMode>,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut found: Vec<ScoreRecord> = guard
            .iter()
            .filter(|record| mode.is_none_or(|m| record.entry.mode == m))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.entry
                .ranking_order(&b.entry)
                .then_with(|| a.id.cmp(&b.id))
        });
        found.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(found)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let scores: Arc<dyn ScoreRepository> = Arc::new(InMemoryRepository::new());
        Self { scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayguess_core::model::PlayerName;
    use dayguess_core::time::fixed_now;

    fn submission(name: &str, mode: LeaderboardMode, score: u32, time: f64) -> ScoreSubmission {
        ScoreSubmission::new(PlayerName::parse(name).unwrap(), mode, score, time).unwrap()
    }

    #[tokio::test]
    async fn lists_in_rank_order_per_mode() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();
        repo.append_score(&submission("slow", LeaderboardMode::Challenge5, 4, 30.0), now)
            .await
            .unwrap();
        repo.append_score(&submission("ten", LeaderboardMode::Challenge10, 9, 50.0), now)
            .await
            .unwrap();
        repo.append_score(&submission("fast", LeaderboardMode::Challenge5, 4, 12.0), now)
            .await
            .unwrap();
        repo.append_score(&submission("best", LeaderboardMode::Challenge5, 5, 40.0), now)
            .await
            .unwrap();

        let five = repo
            .list_scores(Some(LeaderboardMode::Challenge5), 10)
            .await
            .unwrap();
        let names: Vec<_> = five.iter().map(|r| r.entry.name.as_str()).collect();
        assert_eq!(names, ["best", "fast", "slow"]);

        let all = repo.list_scores(None, 2).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].entry.name, "ten");
    }

    #[tokio::test]
    async fn ids_follow_insertion() {
        let repo = InMemoryRepository::new();
        let first = repo
            .append_score(
                &submission("a", LeaderboardMode::Challenge5, 1, 1.0),
                fixed_now(),
            )
            .await
            .unwrap();
        let second = repo
            .append_score(
                &submission("b", LeaderboardMode::Challenge5, 1, 1.0),
                fixed_now(),
            )
            .await
            .unwrap();
        assert_eq!(first, ScoreId::new(1));
        assert_eq!(second, ScoreId::new(2));
    }
}
