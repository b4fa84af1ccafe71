//! Test doubles shared by unit tests.

use crate::error::HttpError;
use crate::http::JsonSession;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// A [`JsonSession`] answering from a URL → response table.
///
/// Unknown URLs answer 404. Every call yields to the scheduler a few times so
/// concurrent callers genuinely overlap.
#[derive(Default)]
pub(crate) struct ScriptedSession {
    responses: Mutex<HashMap<String, Result<serde_json::Value, HttpError>>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    aborted: AtomicBool,
}

impl ScriptedSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, url: &str, response: Result<serde_json::Value, HttpError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JsonSession for ScriptedSession {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.is_aborted() {
            return Err(HttpError::Cancelled);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.is_aborted() {
            return Err(HttpError::Cancelled);
        }

        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(HttpError::Status {
                    status: 404,
                    url: url.to_string(),
                })
            })
    }

    fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// `{ "<base>": { "<target>": rate } }`.
pub(crate) fn rate_table(base: &str, target: &str, rate: f64) -> serde_json::Value {
    serde_json::json!({ base: { target: rate } })
}
