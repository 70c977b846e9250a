use std::sync::Arc;

use services::LeaderboardGateway;

/// What the front end needs from the host application.
pub trait UiApp: Send + Sync {
    fn leaderboard(&self) -> Arc<dyn LeaderboardGateway>;

    /// True when scores go to a remote leaderboard rather than local storage.
    fn leaderboard_is_remote(&self) -> bool;

    /// Name offered when saving a score, if the player gave one up front.
    fn default_player_name(&self) -> Option<String>;
}

#[derive(Clone)]
pub struct AppContext {
    leaderboard: Arc<dyn LeaderboardGateway>,
    leaderboard_is_remote: bool,
    default_player_name: Option<String>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            leaderboard: app.leaderboard(),
            leaderboard_is_remote: app.leaderboard_is_remote(),
            default_player_name: app.default_player_name(),
        }
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<dyn LeaderboardGateway> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn leaderboard_is_remote(&self) -> bool {
        self.leaderboard_is_remote
    }

    #[must_use]
    pub fn default_player_name(&self) -> Option<&str> {
        self.default_player_name.as_deref()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("leaderboard_is_remote", &self.leaderboard_is_remote)
            .field("default_player_name", &self.default_player_name)
            .finish_non_exhaustive()
    }
}
