//! Plain-text renderings of each screen.

mod game;
mod leaderboard;
mod menu;
mod results;
mod state;
mod tutorial;

pub use game::render_game;
pub use leaderboard::render_leaderboard;
pub use menu::{render_menu, render_setup};
pub use results::render_results;
pub use state::{ViewError, ViewState, view_state_from_result};
pub use tutorial::render_tutorial;
