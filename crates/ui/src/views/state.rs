#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    LeaderboardUnavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::LeaderboardUnavailable => "Failed to fetch leaderboard data.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

#[must_use]
pub fn view_state_from_result<T>(result: Result<T, ViewError>) -> ViewState<T> {
    match result {
        Ok(data) => ViewState::Ready(data),
        Err(err) => ViewState::Error(err),
    }
}
