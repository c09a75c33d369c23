//! Test utilities for the circulation crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCirculationStore;

/// Clock frozen at a chosen instant until explicitly advanced.
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use circulation::test_support::FixedClock;
/// use mockable::Clock;
///
/// let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("valid");
/// let clock = FixedClock::new(start);
/// clock.advance(TimeDelta::days(1));
/// assert_eq!(clock.utc(), start + TimeDelta::days(1));
/// ```
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    /// Freeze the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Freeze the clock at midnight UTC on the given date.
    ///
    /// Panics if the date does not exist; test inputs are literals.
    pub fn at_midnight(year: i32, month: u32, day: u32) -> Self {
        match Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single() {
            Some(now) => Self::new(now),
            None => panic!("invalid fixed clock date {year}-{month}-{day}"),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// HTTP state wired to a fresh in-process store and the supplied clock.
///
/// Returns the store alongside the state so tests can inspect it directly.
pub fn in_memory_http_state(clock: Arc<FixedClock>) -> (HttpState, Arc<InMemoryCirculationStore>) {
    let store = Arc::new(InMemoryCirculationStore::new());
    let state = HttpState::from_repositories(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        clock,
    );
    (state, store)
}
