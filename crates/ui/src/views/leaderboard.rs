use std::fmt::Write as _;

use crate::views::ViewState;
use crate::vm::{EMPTY_MESSAGE, LOADING_MESSAGE, LeaderboardTableVm, LeaderboardVm};

fn render_table(out: &mut String, table: &LeaderboardTableVm) {
    writeln!(out, "{}", table.title).ok();
    if table.is_empty() {
        writeln!(out, "  {EMPTY_MESSAGE}").ok();
        return;
    }
    writeln!(out, "  {:<5}{:<16}{:>6}{:>10}", "Rank", "Name", "Score", "Time").ok();
    for row in &table.rows {
        writeln!(
            out,
            "  {:<5}{:<16}{:>6}{:>10}",
            row.rank, row.name, row.score, row.time_str
        )
        .ok();
    }
}

#[must_use]
pub fn render_leaderboard(state: &ViewState<LeaderboardVm>) -> String {
    let mut out = String::from("Hall of Fame\n\n");
    match state {
        ViewState::Idle | ViewState::Loading => {
            writeln!(out, "{LOADING_MESSAGE}").ok();
        }
        ViewState::Error(err) => {
            writeln!(out, "{}", err.message()).ok();
        }
        ViewState::Ready(vm) => {
            for table in &vm.tables {
                render_table(&mut out, table);
                out.push('\n');
            }
        }
    }
    out
}
