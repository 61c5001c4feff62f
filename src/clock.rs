//! Time source for the engines.
//!
//! Lateness, the today-record lookup and every timestamp are derived from the
//! injected [`Clock`], in the employee's local offset.

use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate};

/// Supplies the current local time.
pub trait Clock: Send + Sync {
    /// The current instant, carrying the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;

    /// The current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Reads the host's wall clock in its local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use attendance_engine::clock::{Clock, ManualClock};
/// use chrono::Duration;
///
/// let clock = ManualClock::parse("2026-01-15T08:45:00+10:00");
/// clock.advance(Duration::hours(8));
/// assert_eq!(clock.now().to_rfc3339(), "2026-01-15T16:45:00+10:00");
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Creates a clock from an RFC 3339 timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `rfc3339` is not a valid timestamp; meant for fixtures.
    pub fn parse(rfc3339: &str) -> Self {
        let now = DateTime::parse_from_rfc3339(rfc3339)
            .unwrap_or_else(|e| panic!("invalid fixture timestamp '{}': {}", rfc3339, e));
        Self::new(now)
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.lock() = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.lock();
        *now += delta;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<FixedOffset>> {
        // A poisoned guard still holds a valid timestamp.
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.lock()
    }
}
