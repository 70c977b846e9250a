pub mod calendar;
mod ids;
mod mode;
mod round;
mod score;
mod settings;
mod summary;

pub use calendar::{
    CalendarError, FIRST_DATE, LAST_DATE, WEEKDAYS, parse_weekday, weekday_from_index,
    weekday_index, weekday_name, weekday_of,
};
pub use ids::{ScoreId, SessionId};
pub use mode::{LeaderboardMode, MIN_TIME_ATTACK_SECS, Mode, ModeError, TIME_ATTACK_STEP_SECS};
pub use round::{Round, RoundError, RoundOutcome};
pub use score::{
    MAX_NAME_LEN, PlayerName, ScoreEntry, ScoreError, ScoreSubmission, sort_by_rank,
};
pub use settings::{LeaderboardSettings, LeaderboardSettingsDraft, SettingsError};
pub use summary::{ResultSummary, SessionAggregate, SummaryError};
