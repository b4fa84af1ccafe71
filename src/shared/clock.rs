//! Injectable time source.
//!
//! Date generation and TTL checks read "now" through a [`Clock`] so they can be
//! driven deterministically in tests.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    /// Wall-clock instant used for envelope timestamps and TTL ages.
    fn now(&self) -> DateTime<Utc>;

    /// The calendar day that counts as "today" for date generation.
    fn today(&self) -> NaiveDate;

    /// Seconds since the Unix epoch, fractional.
    fn unix_seconds(&self) -> f64 {
        self.now().timestamp_micros() as f64 / 1e6
    }
}

/// The system clock; "today" is the local calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A manually advanced clock. "Today" is the UTC day of the current instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Noon UTC on the given day.
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(DateTime::<Utc>::from_naive_utc_and_offset(noon, Utc))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.lock();
        *now += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }

    fn today(&self) -> NaiveDate {
        self.lock().date_naive()
    }
}
