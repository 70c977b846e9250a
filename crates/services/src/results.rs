use dayguess_core::model::ResultSummary;

use crate::error::SessionError;
use crate::sessions::SessionState;

/// Final statistics for an ended session.
///
/// # Errors
///
/// Returns `SessionError::InvalidState` if the session is still running, or
/// `SessionError::Summary` if its totals are inconsistent.
pub fn summarize(state: &SessionState) -> Result<ResultSummary, SessionError> {
    let ended_at = state
        .ended_at()
        .ok_or_else(|| SessionError::invalid_state("summarize the session", "it has not ended"))?;
    Ok(ResultSummary::from_aggregate(
        state.mode(),
        state.aggregate(),
        ended_at,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Weekday};
    use dayguess_core::model::{Mode, Round, SessionId};
    use dayguess_core::time::fixed_now;

    fn state(mode: Mode) -> SessionState {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let round = Round::new(1, date, fixed_now()).unwrap();
        SessionState::new(SessionId::new(1), mode, fixed_now(), round)
    }

    #[test]
    fn running_session_cannot_be_summarized() {
        let err = summarize(&state(Mode::challenge(5))).unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn challenge_summary_averages_session_time() {
        let mut s = state(Mode::challenge(2));
        let mut round = s.current_round().cloned().unwrap();
        let outcome = round
            .record_guess(s.mode(), Weekday::Sat, fixed_now() + Duration::seconds(3))
            .unwrap();
        s.record(outcome);
        s.end(fixed_now() + Duration::seconds(9), 9.0);

        let summary = summarize(&s).unwrap();
        assert_eq!(summary.correct_count(), 1);
        assert_eq!(summary.total_elapsed_seconds(), 9.0);
        assert_eq!(summary.average_seconds_per_round(), Some(4.5));
        assert_eq!(summary.completed_at(), fixed_now() + Duration::seconds(9));
    }
}
