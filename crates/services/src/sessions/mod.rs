mod controller;
mod snapshot;
mod state;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::GameController;
pub use snapshot::{GameSnapshot, RoundView};
pub use state::{SaveState, Screen, SessionState};
