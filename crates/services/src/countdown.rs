//! Countdown timers for time attack sessions.
//!
//! A countdown invokes its expiry callback at most once. Cancelling consumes
//! the handle, so a timer cannot be stopped twice.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub type ExpiryCallback = Box<dyn FnOnce() + Send + 'static>;

/// Starts countdowns.
pub trait Countdown: Send + Sync {
    /// Run `on_expire` once after `duration`, unless the returned handle is
    /// cancelled first.
    fn start(&self, duration: Duration, on_expire: ExpiryCallback) -> Box<dyn CountdownHandle>;
}

/// A running countdown.
pub trait CountdownHandle: Send {
    fn cancel(self: Box<Self>);
}

//
// ─── TOKIO ────────────────────────────────────────────────────────────────────
//

/// Countdown backed by a sleeping tokio task.
#[derive(Clone, Debug)]
pub struct TokioCountdown {
    runtime: Handle,
}

impl TokioCountdown {
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime of the calling task.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Countdown for TokioCountdown {
    fn start(&self, duration: Duration, on_expire: ExpiryCallback) -> Box<dyn CountdownHandle> {
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            on_expire();
        });
        Box::new(TokioCountdownHandle { task })
    }
}

struct TokioCountdownHandle {
    task: JoinHandle<()>,
}

impl CountdownHandle for TokioCountdownHandle {
    fn cancel(self: Box<Self>) {
        self.task.abort();
    }
}

//
// ─── MANUAL ───────────────────────────────────────────────────────────────────
//

/// Countdown fired by hand; records how timers were started and stopped.
#[derive(Clone, Default)]
pub struct ManualCountdown {
    timers: Arc<Mutex<Vec<ManualTimer>>>,
}

struct ManualTimer {
    duration: Duration,
    on_expire: Option<ExpiryCallback>,
    cancelled: bool,
}

impl ManualCountdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every timer that is neither cancelled nor already fired.
    /// Returns how many callbacks ran.
    pub fn expire_all(&self) -> usize {
        let callbacks: Vec<ExpiryCallback> = {
            let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
            timers
                .iter_mut()
                .filter(|t| !t.cancelled)
                .filter_map(|t| t.on_expire.take())
                .collect()
        };
        let fired = callbacks.len();
        for callback in callbacks {
            callback();
        }
        fired
    }

    /// Durations of every timer started so far.
    #[must_use]
    pub fn started(&self) -> Vec<Duration> {
        let timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        timers.iter().map(|t| t.duration).collect()
    }

    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        let timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        timers.iter().filter(|t| t.cancelled).count()
    }

    /// Timers that could still fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        let timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        timers
            .iter()
            .filter(|t| !t.cancelled && t.on_expire.is_some())
            .count()
    }
}

impl Countdown for ManualCountdown {
    fn start(&self, duration: Duration, on_expire: ExpiryCallback) -> Box<dyn CountdownHandle> {
        let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        timers.push(ManualTimer {
            duration,
            on_expire: Some(on_expire),
            cancelled: false,
        });
        Box::new(ManualHandle {
            timers: Arc::clone(&self.timers),
            slot: timers.len() - 1,
        })
    }
}

struct ManualHandle {
    timers: Arc<Mutex<Vec<ManualTimer>>>,
    slot: usize,
}

impl CountdownHandle for ManualHandle {
    fn cancel(self: Box<Self>) {
        let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = timers.get_mut(self.slot) {
            timer.cancelled = true;
            timer.on_expire = None;
        }
    }
}

impl std::fmt::Debug for ManualCountdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualCountdown")
            .field("started", &self.started().len())
            .field("cancelled", &self.cancelled_count())
            .finish()
    }
}
