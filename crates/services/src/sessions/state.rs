use chrono::{DateTime, Utc};
use dayguess_core::model::{Mode, Round, RoundOutcome, SessionAggregate, SessionId};

/// Which screen the game is on.
///
/// `Tutorial` and `Leaderboard` are views owned elsewhere; they are reached
/// from the menu, return to it, and never hold session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Menu,
    ModeSetup,
    Tutorial,
    Leaderboard,
    Playing,
    Results,
}

/// Progress of publishing a finished result to the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Unsaved,
    Saving,
    Saved,
}

/// State of the single live session, owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    id: SessionId,
    mode: Mode,
    started_at: DateTime<Utc>,
    round_index: u32,
    current_round: Option<Round>,
    aggregate: SessionAggregate,
    last_outcome: Option<RoundOutcome>,
    ended_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub(crate) fn new(id: SessionId, mode: Mode, started_at: DateTime<Utc>, first: Round) -> Self {
        Self {
            id,
            mode,
            started_at,
            round_index: first.index(),
            current_round: Some(first),
            aggregate: SessionAggregate::default(),
            last_outcome: None,
            ended_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// 1-based number of the round in play (or last played).
    #[must_use]
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    #[must_use]
    pub fn aggregate(&self) -> &SessionAggregate {
        &self.aggregate
    }

    /// Outcome on display. Always `None` in time attack.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    pub(crate) fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.current_round.as_mut()
    }

    pub(crate) fn record(&mut self, outcome: RoundOutcome) {
        self.aggregate.record(&outcome);
        self.last_outcome = self.mode.shows_outcome().then_some(outcome);
    }

    pub(crate) fn next_round_index(&self) -> u32 {
        self.round_index.saturating_add(1)
    }

    pub(crate) fn begin_round(&mut self, round: Round) {
        self.round_index = round.index();
        self.current_round = Some(round);
        self.last_outcome = None;
    }

    /// Close the session: no round in play, totals fixed to wall-clock time.
    pub(crate) fn end(&mut self, ended_at: DateTime<Utc>, session_seconds: f64) {
        self.current_round = None;
        self.last_outcome = None;
        self.aggregate.close(session_seconds);
        self.ended_at = Some(ended_at);
    }
}
