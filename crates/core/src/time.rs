use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

/// A clock abstraction for deterministic round and session timing.
///
/// `Manual` clocks share their instant between clones, so a test can keep one
/// handle and advance the time seen by a controller holding another.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
    Manual(ManualClock),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns a shared, manually advanced clock starting at `at`.
    #[must_use]
    pub fn manual(at: DateTime<Utc>) -> (Self, ManualClock) {
        let handle = ManualClock::new(at);
        (Self::Manual(handle.clone()), handle)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
            Clock::Manual(handle) => handle.now(),
        }
    }

    /// Advance a fixed or manual clock by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        match self {
            Clock::Default => {}
            Clock::Fixed(t) => *t += delta,
            Clock::Manual(handle) => handle.advance(delta),
        }
    }

    /// Seconds elapsed between `since` and now, never negative.
    #[must_use]
    pub fn seconds_since(&self, since: DateTime<Utc>) -> f64 {
        elapsed_seconds(since, self.now())
    }

    /// Returns true if this clock represents real time.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Clock::Default)
    }
}

/// Shared handle behind `Clock::Manual`, stored as epoch milliseconds.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(at.timestamp_millis())),
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.millis.load(Ordering::SeqCst))
            .unwrap_or_default()
    }

    pub fn advance(&self, delta: Duration) {
        self.millis
            .fetch_add(delta.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(Duration::seconds(secs));
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }
}

/// Fractional seconds from `start` to `end`, clamped at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds().max(0);
    millis as f64 / 1000.0
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

/// Returns a manual clock starting at the deterministic test timestamp.
#[must_use]
pub fn manual_clock() -> (Clock, ManualClock) {
    Clock::manual(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let (clock, handle) = manual_clock();
        let copy = clock.clone();
        handle.advance_millis(1_500);

        assert_eq!(clock.seconds_since(fixed_now()), 1.5);
        assert_eq!(copy.now(), fixed_now() + Duration::milliseconds(1_500));
    }

    #[test]
    fn elapsed_never_negative() {
        let later = fixed_now() + Duration::seconds(3);
        assert_eq!(elapsed_seconds(later, fixed_now()), 0.0);
        assert_eq!(elapsed_seconds(fixed_now(), later), 3.0);
    }

    #[test]
    fn fixed_clock_advances_in_place() {
        let mut clock = fixed_clock();
        clock.advance(Duration::seconds(10));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(10));
        assert!(!clock.is_default());
    }
}
