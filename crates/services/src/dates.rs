use std::collections::VecDeque;

use chrono::{Days, NaiveDate};
use dayguess_core::model::{FIRST_DATE, LAST_DATE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the dates shown to the player.
pub trait DateGenerator: Send {
    /// Returns a date between 1900-01-01 and 2100-12-31 inclusive.
    fn generate(&mut self) -> NaiveDate;
}

/// Uniformly random dates over the whole playable range.
///
/// Each whole day in the range is equally likely, both ends included.
#[derive(Debug, Clone)]
pub struct RandomDates {
    rng: StdRng,
}

impl RandomDates {
    /// Seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for tests and replays.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDates {
    fn default() -> Self {
        Self::new()
    }
}

impl DateGenerator for RandomDates {
    fn generate(&mut self) -> NaiveDate {
        let span = u64::try_from((LAST_DATE - FIRST_DATE).num_days()).unwrap_or(0);
        let offset = self.rng.random_range(0..=span);
        FIRST_DATE
            .checked_add_days(Days::new(offset))
            .unwrap_or(LAST_DATE)
    }
}

/// Replays a fixed list of dates, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedDates {
    queue: VecDeque<NaiveDate>,
}

impl ScriptedDates {
    /// Returns `None` when `dates` is empty.
    #[must_use]
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        let queue: VecDeque<_> = dates.into_iter().collect();
        (!queue.is_empty()).then_some(Self { queue })
    }
}

impl DateGenerator for ScriptedDates {
    fn generate(&mut self) -> NaiveDate {
        match self.queue.pop_front() {
            Some(date) => {
                self.queue.push_back(date);
                date
            }
            None => FIRST_DATE,
        }
    }
}
