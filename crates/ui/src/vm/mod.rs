mod game_vm;
mod leaderboard_vm;
mod menu_vm;
mod results_vm;
mod setup_vm;
mod time_fmt;
mod tutorial_vm;

pub use game_vm::{
    DayButtonState, DayButtonVm, FINISH_CHALLENGE, GameVm, NEXT_DATE, PRACTICE_PROMPT,
    outcome_message, prompt,
};
pub use leaderboard_vm::{
    EMPTY_MESSAGE, LOADING_MESSAGE, LeaderboardRowVm, LeaderboardTableVm, LeaderboardVm,
    load_leaderboard, map_leaderboard, table_title,
};
pub use menu_vm::{MENU_SUBTITLE, MENU_TITLE, MenuAction, MenuEntryVm, menu_entries, parse_menu_choice};
pub use results_vm::ResultsVm;
pub use setup_vm::{DEFAULT_TIME_ATTACK_SECS, MAX_TIME_ATTACK_SECS, SetupVm};
pub use time_fmt::{format_countdown, format_date, format_datetime, format_seconds};
pub use tutorial_vm::{
    DoomsdayWalkthrough, century_anchor, example_date, month_doomsday_day, walkthrough,
};
