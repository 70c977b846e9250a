use chrono::{NaiveDate, Weekday};
use dayguess_core::model::{Mode, ResultSummary, Round, RoundOutcome, SessionAggregate};

use super::state::{SaveState, Screen};

/// Everything a renderer needs to draw the active screen.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub screen: Screen,
    pub mode: Option<Mode>,
    pub round: Option<RoundView>,
    pub aggregate: SessionAggregate,
    pub last_outcome: Option<RoundOutcome>,
    pub seconds_left: Option<u32>,
    pub summary: Option<ResultSummary>,
    pub save_state: SaveState,
}

impl GameSnapshot {
    #[must_use]
    pub fn menu() -> Self {
        Self {
            screen: Screen::Menu,
            mode: None,
            round: None,
            aggregate: SessionAggregate::default(),
            last_outcome: None,
            seconds_left: None,
            summary: None,
            save_state: SaveState::Unsaved,
        }
    }

    /// True while an answered round waits for the player to move on.
    #[must_use]
    pub fn is_showing_outcome(&self) -> bool {
        self.screen == Screen::Playing && self.last_outcome.is_some()
    }
}

/// Displayable fields of the round in play.
///
/// The correct weekday is only revealed once the round is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundView {
    pub index: u32,
    pub total: Option<u32>,
    pub date: NaiveDate,
    pub is_finished: bool,
    pub guess: Option<Weekday>,
    pub correct_weekday: Option<Weekday>,
}

impl RoundView {
    pub(crate) fn new(round: &Round, mode: Mode) -> Self {
        let revealed = round.is_finished() && mode.shows_outcome();
        Self {
            index: round.index(),
            total: mode.round_limit(),
            date: round.date(),
            is_finished: round.is_finished(),
            guess: round.guess(),
            correct_weekday: revealed.then(|| round.correct_weekday()),
        }
    }

    /// Whether this is the final round of a fixed-length session.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total.is_some_and(|total| self.index >= total)
    }
}
