use dayguess_core::model::{LeaderboardMode, ScoreEntry, sort_by_rank};
use services::LeaderboardGateway;

use crate::views::ViewError;

pub const LOADING_MESSAGE: &str = "Loading Hall of Fame...";
pub const EMPTY_MESSAGE: &str = "No scores recorded for this mode yet.";

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub name: String,
    pub score: u32,
    pub time_str: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardTableVm {
    pub mode: LeaderboardMode,
    pub title: &'static str,
    pub rows: Vec<LeaderboardRowVm>,
}

impl LeaderboardTableVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One table per ranked mode, in a fixed order.
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardVm {
    pub tables: Vec<LeaderboardTableVm>,
}

#[must_use]
pub fn table_title(mode: LeaderboardMode) -> &'static str {
    match mode {
        LeaderboardMode::Challenge5 => "5-Date Challenge",
        LeaderboardMode::Challenge10 => "10-Date Challenge",
    }
}

/// Split `entries` by mode and rank each table.
///
/// Ranking is competition style: a row that ties the one above on score and
/// time shares its rank, otherwise its rank is its 1-based position.
#[must_use]
pub fn map_leaderboard(entries: &[ScoreEntry]) -> LeaderboardVm {
    let tables = LeaderboardMode::ALL
        .iter()
        .map(|&mode| {
            let mut scores: Vec<ScoreEntry> =
                entries.iter().filter(|e| e.mode == mode).cloned().collect();
            sort_by_rank(&mut scores);
            LeaderboardTableVm {
                mode,
                title: table_title(mode),
                rows: rank_rows(&scores),
            }
        })
        .collect();
    LeaderboardVm { tables }
}

fn rank_rows(scores: &[ScoreEntry]) -> Vec<LeaderboardRowVm> {
    let mut rank = 1;
    scores
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if index > 0 && entry.ranks_below(&scores[index - 1]) {
                rank = index + 1;
            }
            LeaderboardRowVm {
                rank,
                name: entry.name.clone(),
                score: entry.score,
                time_str: format!("{:.2}s", entry.time),
            }
        })
        .collect()
}

/// # Errors
///
/// Returns `ViewError::LeaderboardUnavailable` when the gateway fails.
pub async fn load_leaderboard(gateway: &dyn LeaderboardGateway) -> Result<LeaderboardVm, ViewError> {
    let entries = gateway
        .fetch_scores()
        .await
        .map_err(|_| ViewError::LeaderboardUnavailable)?;
    Ok(map_leaderboard(&entries))
}
