use dayguess_core::model::{LeaderboardMode, Mode, ResultSummary};
use services::SaveState;

use crate::vm::time_fmt::{format_datetime, format_seconds};

/// The results screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: &'static str,
    pub lines: Vec<String>,
    pub completed_at_str: String,
    /// Leaderboard this result can be saved to, if any.
    pub leaderboard: Option<LeaderboardMode>,
    pub save_status: Option<&'static str>,
    /// Ranked result that has not been saved or started saving.
    pub can_save: bool,
}

impl ResultsVm {
    #[must_use]
    pub fn new(summary: &ResultSummary, save_state: SaveState) -> Self {
        let correct = summary.correct_count();
        let total = format_seconds(summary.total_elapsed_seconds());

        let (title, mut lines) = match summary.mode() {
            Mode::Challenge { rounds } => (
                "Challenge Complete!",
                vec![format!("You answered {correct} out of {rounds} correctly.")],
            ),
            Mode::TimeAttack { .. } => (
                "Time's Up!",
                vec![format!(
                    "You answered {correct} of {} dates correctly.",
                    summary.total_attempts()
                )],
            ),
            Mode::Practice => (
                "Practice Complete",
                vec![format!(
                    "You answered {correct} of {} dates correctly.",
                    summary.total_attempts()
                )],
            ),
        };
        lines.push(format!("Total time: {total} seconds"));
        if let Some(average) = summary.average_seconds_per_round() {
            lines.push(format!("Average time per date: {} seconds", format_seconds(average)));
        }

        let leaderboard = summary.mode().leaderboard_mode();
        let save_status = leaderboard.and_then(|_| match save_state {
            SaveState::Unsaved => None,
            SaveState::Saving => Some("Saving..."),
            SaveState::Saved => Some("Score saved!"),
        });

        Self {
            title,
            lines,
            completed_at_str: format_datetime(summary.completed_at()),
            leaderboard,
            save_status,
            can_save: leaderboard.is_some() && save_state == SaveState::Unsaved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayguess_core::model::SessionAggregate;
    use dayguess_core::time::fixed_now;

    fn summary(mode: Mode, correct: u32, attempts: u32, seconds: f64) -> ResultSummary {
        let aggregate = SessionAggregate {
            correct_count: correct,
            total_attempts: attempts,
            total_elapsed_seconds: seconds,
        };
        ResultSummary::from_aggregate(mode, &aggregate, fixed_now()).unwrap()
    }

    #[test]
    fn challenge_results_show_average() {
        let vm = ResultsVm::new(&summary(Mode::challenge(5), 4, 5, 12.5), SaveState::Unsaved);
        assert_eq!(vm.title, "Challenge Complete!");
        assert_eq!(
            vm.lines,
            [
                "You answered 4 out of 5 correctly.",
                "Total time: 12.50 seconds",
                "Average time per date: 2.50 seconds",
            ]
        );
        assert_eq!(vm.leaderboard, Some(LeaderboardMode::Challenge5));
        assert!(vm.can_save);
    }

    #[test]
    fn time_attack_results_have_no_average_and_no_save() {
        let vm = ResultsVm::new(&summary(Mode::time_attack(30), 6, 9, 30.0), SaveState::Unsaved);
        assert_eq!(vm.title, "Time's Up!");
        assert_eq!(vm.lines.len(), 2);
        assert_eq!(vm.lines[0], "You answered 6 of 9 dates correctly.");
        assert_eq!(vm.leaderboard, None);
        assert!(!vm.can_save);
    }

    #[test]
    fn save_status_tracks_state() {
        let s = summary(Mode::challenge(10), 10, 10, 40.0);
        assert_eq!(ResultsVm::new(&s, SaveState::Saving).save_status, Some("Saving..."));
        assert_eq!(ResultsVm::new(&s, SaveState::Saved).save_status, Some("Score saved!"));
        assert_eq!(ResultsVm::new(&s, SaveState::Unsaved).save_status, None);
    }

    #[test]
    fn only_unsaved_ranked_results_can_be_saved() {
        let s = summary(Mode::challenge(5), 3, 5, 20.0);
        assert!(ResultsVm::new(&s, SaveState::Unsaved).can_save);
        assert!(!ResultsVm::new(&s, SaveState::Saving).can_save);
        assert!(!ResultsVm::new(&s, SaveState::Saved).can_save);
    }
}
