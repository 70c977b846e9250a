use chrono::{DateTime, Utc};
use dayguess_core::model::{LeaderboardMode, ScoreId, ScoreSubmission};

use super::SqliteRepository;
use super::mapping::map_score_row;
use crate::repository::{ScoreRecord, ScoreRepository, StorageError};

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn append_score(
        &self,
        submission: &ScoreSubmission,
        created_at: DateTime<Utc>,
    ) -> Result<ScoreId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO scores (name, mode, score, time, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(submission.name().as_str())
        .bind(submission.mode().as_str())
        .bind(i64::from(submission.score()))
        .bind(submission.time_secs())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(ScoreId::new(res.last_insert_rowid()))
    }

    async fn list_scores(
        &self,
        mode: Option<LeaderboardMode>,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, StorageError> {
        let mut sql = String::from(
            r"
                SELECT id, name, mode, score, time, created_at
                FROM scores
            ",
        );
        let mut bind_index = 1;
        if mode.is_some() {
            sql.push_str(" WHERE mode = ?");
            sql.push_str(&bind_index.to_string());
            bind_index += 1;
        }
        sql.push_str(" ORDER BY score DESC, time ASC, id ASC");
        sql.push_str(" LIMIT ?");
        sql.push_str(&bind_index.to_string());

        let mut query = sqlx::query(&sql);
        if let Some(mode) = mode {
            query = query.bind(mode.as_str());
        }
        query = query.bind(i64::from(limit));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_score_row(&row)?);
        }
        Ok(out)
    }
}
