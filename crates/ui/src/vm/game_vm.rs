use chrono::Weekday;
use dayguess_core::model::calendar::{WEEKDAYS, weekday_name};
use dayguess_core::model::{Mode, RoundOutcome};
use services::{GameSnapshot, RoundView, Screen};

use crate::vm::time_fmt::{format_countdown, format_date, format_seconds};

pub const PRACTICE_PROMPT: &str = "What day of the week is it?";
pub const NEXT_DATE: &str = "Next Date";
pub const FINISH_CHALLENGE: &str = "Finish Challenge";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayButtonState {
    /// Round still open; the button can be pressed.
    Open,
    Correct,
    Wrong,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayButtonVm {
    pub weekday: Weekday,
    pub label: &'static str,
    pub state: DayButtonState,
}

/// The playing screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameVm {
    pub date_label: String,
    pub message: String,
    pub round_time: Option<String>,
    pub buttons: Vec<DayButtonVm>,
    pub next_label: Option<&'static str>,
    pub countdown: Option<String>,
    pub tally: Option<String>,
}

impl GameVm {
    /// `None` unless a round is in play.
    #[must_use]
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Option<Self> {
        if snapshot.screen != Screen::Playing {
            return None;
        }
        let mode = snapshot.mode?;
        let round = snapshot.round?;
        let outcome = snapshot.last_outcome;

        let message = match outcome {
            Some(outcome) => outcome_message(&outcome),
            None => prompt(mode, &round),
        };
        let next_label = outcome.map(|_| if round.is_last() { FINISH_CHALLENGE } else { NEXT_DATE });
        let tally = matches!(mode, Mode::TimeAttack { .. }).then(|| {
            format!(
                "Correct: {} of {}",
                snapshot.aggregate.correct_count, snapshot.aggregate.total_attempts
            )
        });

        Some(Self {
            date_label: format_date(round.date),
            message,
            round_time: outcome.map(|o| format!("Round time: {} seconds.", format_seconds(o.elapsed_seconds))),
            buttons: day_buttons(&round),
            next_label,
            countdown: snapshot.seconds_left.map(format_countdown),
            tally,
        })
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.next_label.is_some()
    }
}

#[must_use]
pub fn prompt(mode: Mode, round: &RoundView) -> String {
    match mode {
        Mode::Practice => PRACTICE_PROMPT.to_string(),
        Mode::Challenge { rounds } => format!("Date {} of {rounds}", round.index),
        Mode::TimeAttack { .. } => format!("Date {}", round.index),
    }
}

#[must_use]
pub fn outcome_message(outcome: &RoundOutcome) -> String {
    let day = weekday_name(outcome.correct_weekday);
    if outcome.was_correct {
        format!("Correct! It was a {day}.")
    } else {
        format!("Not quite. The correct day was {day}.")
    }
}

fn day_buttons(round: &RoundView) -> Vec<DayButtonVm> {
    WEEKDAYS
        .iter()
        .map(|&weekday| {
            let state = match round.correct_weekday {
                None => DayButtonState::Open,
                Some(correct) if weekday == correct => DayButtonState::Correct,
                Some(_) if round.guess == Some(weekday) => DayButtonState::Wrong,
                Some(_) => DayButtonState::Other,
            };
            DayButtonVm {
                weekday,
                label: weekday_name(weekday),
                state,
            }
        })
        .collect()
}
