#![forbid(unsafe_code)]

pub mod countdown;
pub mod dates;
pub mod error;
pub mod leaderboard;
pub mod results;
pub mod round_engine;
pub mod score_service;
pub mod sessions;

pub use dayguess_core::Clock;

pub use countdown::{Countdown, CountdownHandle, ManualCountdown, TokioCountdown};
pub use dates::{DateGenerator, RandomDates, ScriptedDates};
pub use error::{ConfigError, GatewayError, ScoreServiceError, SessionError};
pub use leaderboard::{HttpLeaderboard, LeaderboardGateway, LocalLeaderboard};
pub use round_engine::RoundEngine;
pub use score_service::{ScoreRequest, ScoreService};
pub use sessions::{GameController, GameSnapshot, RoundView, SaveState, Screen, SessionState};
