//! On-disk envelope wrapping every persisted cache blob.

use serde::{Deserialize, Serialize};

/// `{ "ts": <unix-seconds>, "data": <payload> }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope<T> {
    /// Write time, seconds since the Unix epoch.
    pub ts: f64,
    pub data: T,
}

impl<T> CacheEnvelope<T> {
    pub fn new(ts: f64, data: T) -> Self {
        Self { ts, data }
    }

    /// Seconds since the envelope was written.
    pub fn age_secs(&self, now_secs: f64) -> f64 {
        now_secs - self.ts
    }

    /// Whether the envelope is no older than `max_age_secs`.
    pub fn is_fresh(&self, now_secs: f64, max_age_secs: f64) -> bool {
        self.age_secs(now_secs) <= max_age_secs
    }
}
