use dayguess_core::model::{MIN_TIME_ATTACK_SECS, Mode, TIME_ATTACK_STEP_SECS};

pub const DEFAULT_TIME_ATTACK_SECS: u32 = 60;
pub const MAX_TIME_ATTACK_SECS: u32 = 300;

/// Time attack duration picker. Steps in multiples of five seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupVm {
    duration_secs: u32,
}

impl Default for SetupVm {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_TIME_ATTACK_SECS,
        }
    }
}

impl SetupVm {
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn increase(&mut self) {
        self.duration_secs = (self.duration_secs + TIME_ATTACK_STEP_SECS).min(MAX_TIME_ATTACK_SECS);
    }

    pub fn decrease(&mut self) {
        self.duration_secs = self
            .duration_secs
            .saturating_sub(TIME_ATTACK_STEP_SECS)
            .max(MIN_TIME_ATTACK_SECS);
    }

    /// Set an exact duration. Validation happens when the session starts.
    pub fn set(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Time Attack: {} seconds", self.duration_secs)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::TimeAttack {
            duration_secs: self.duration_secs,
        }
    }
}
