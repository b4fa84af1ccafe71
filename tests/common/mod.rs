//! Shared helpers for integration tests.
//!
//! Integration tests can't reach the library's `#[cfg(test)]` doubles, so the
//! scripted session lives here too.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use fx_history::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const MOCK_ROOT: &str = "mock://fx";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn days_ago(n: u64) -> NaiveDate {
    today() - Days::new(n)
}

pub fn usd_zar() -> CurrencyPair {
    CurrencyPair::parse("usd", "zar").unwrap()
}

/// A fresh, unique cache directory under the system temp dir.
pub fn temp_cache_dir() -> PathBuf {
    std::env::temp_dir().join(format!("fx-history-it-{}", uuid::Uuid::new_v4()))
}

pub fn primary_url(date: NaiveDate) -> String {
    format!("{MOCK_ROOT}/primary/{date}/usd.min.json")
}

pub fn fallback_url(date: NaiveDate) -> String {
    format!("{MOCK_ROOT}/fallback/{date}/usd.min.json")
}

pub fn rate_table(rate: f64) -> serde_json::Value {
    serde_json::json!({ "usd": { "zar": rate } })
}

/// URL → response table. Unknown URLs answer 404.
#[derive(Default)]
pub struct ScriptedSession {
    responses: Mutex<HashMap<String, Result<serde_json::Value, HttpError>>>,
    calls: Mutex<Vec<String>>,
    aborted: AtomicBool,
}

impl ScriptedSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, response: Result<serde_json::Value, HttpError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), response);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl JsonSession for ScriptedSession {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        self.calls.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;
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

/// A client over `session` whose required dates are the last `days` days.
pub fn client_with(session: &Arc<ScriptedSession>, cache_dir: PathBuf, days: u32) -> FxClient {
    FxClient::builder()
        .session(session.clone())
        .endpoints(Endpoints::mirrored(MOCK_ROOT))
        .cache_dir(cache_dir)
        .clock(Arc::new(FixedClock::at_date(today())))
        .dates(DatePlan::daily(days))
        .build()
        .unwrap()
}
