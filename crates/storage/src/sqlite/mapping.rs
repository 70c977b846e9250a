use dayguess_core::model::{LeaderboardMode, ScoreEntry, ScoreId};
use sqlx::Row;

use crate::repository::{ScoreRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn parse_mode(s: &str) -> Result<LeaderboardMode, StorageError> {
    s.parse::<LeaderboardMode>().map_err(ser)
}

pub(crate) fn map_score_row(row: &sqlx::sqlite::SqliteRow) -> Result<ScoreRecord, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let name: String = row.try_get("name").map_err(ser)?;
    let mode: String = row.try_get("mode").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let time: f64 = row.try_get("time").map_err(ser)?;
    let created_at = row.try_get("created_at").map_err(ser)?;

    Ok(ScoreRecord {
        id: ScoreId::new(id),
        entry: ScoreEntry {
            name,
            mode: parse_mode(&mode)?,
            score,
            time,
        },
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_modes() {
        assert_eq!(parse_mode("challenge_10").unwrap(), LeaderboardMode::Challenge10);
        assert!(matches!(
            parse_mode("time_attack"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn rejects_negative_scores() {
        assert!(u32_from_i64("score", -1).is_err());
        assert_eq!(u32_from_i64("score", 7).unwrap(), 7);
    }
}
