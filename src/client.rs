//! High-level client — `FxClient` with nested sub-client accessors.
//!
//! The client is the context object: it owns the store handle, the provider
//! session, the settings and notification sinks, and the background timers.
//! Build it on enable, call [`FxClient::shutdown`] on disable.

use crate::config::{
    default_cache_dir, FxConfig, MemorySettings, SettingsSource, DEFAULT_CURRENCY_LIST_TTL,
    DEFAULT_FETCH_BATCH, DEFAULT_REFRESH_INTERVAL, DEFAULT_REQUEST_TIMEOUT,
};
use crate::domain::currency::client::Currencies;
use crate::domain::currency::{Notifier, NullNotifier, FALLBACK_BASE, FALLBACK_TARGET};
use crate::domain::dates::DatePlan;
use crate::domain::history::client::History;
use crate::domain::history::{BaselinePolicy, HistoryStore, HistorySynchronizer};
use crate::domain::rates::ProviderClient;
use crate::error::{FxError, StoreError};
use crate::http::JsonSession;
use crate::network::Endpoints;
use crate::shared::{Clock, CurrencyPair, SystemClock};

use async_lock::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

// Re-export sub-client types for convenience.
pub use crate::domain::currency::client::Currencies as CurrenciesClient;
pub use crate::domain::history::client::History as HistoryClient;

/// Periodic work the presentation layer should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Refresh the configured pair, busting today.
    Rates,
    /// Refresh the currency list without forcing.
    CurrencyList,
}

/// The primary entry point.
///
/// Provides nested sub-client accessors for each domain:
/// `client.history()`, `client.currencies()`.
#[derive(Clone)]
pub struct FxClient {
    pub(crate) config: Arc<FxConfig>,
    pub(crate) session: Arc<dyn JsonSession>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) store: HistoryStore,
    pub(crate) provider: ProviderClient,
    pub(crate) synchronizer: HistorySynchronizer,
    pub(crate) settings: Arc<dyn SettingsSource>,
    pub(crate) notifier: Arc<dyn Notifier>,
    /// One async mutex per pair so refreshes of a pair never overlap.
    pub(crate) refresh_locks: Arc<Mutex<HashMap<CurrencyPair, Arc<Mutex<()>>>>>,
    pub(crate) timers: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl FxClient {
    pub fn builder() -> FxClientBuilder {
        FxClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    pub fn currencies(&self) -> Currencies<'_> {
        Currencies { client: self }
    }

    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn settings(&self) -> &Arc<dyn SettingsSource> {
        &self.settings
    }

    /// Spawn the hourly rate timer and the daily currency-list timer.
    ///
    /// Ticks arrive on the returned channel; the first of each fires one full
    /// period after this call. Starting again replaces the previous timers.
    pub async fn start_timers(&self) -> mpsc::Receiver<Tick> {
        let (tx, rx) = mpsc::channel(8);
        let handles = vec![
            spawn_timer(self.config.refresh_interval, Tick::Rates, tx.clone()),
            spawn_timer(self.config.currency_list_ttl, Tick::CurrencyList, tx),
        ];

        let mut timers = self.timers.lock().await;
        for old in timers.drain(..) {
            old.abort();
        }
        timers.extend(handles);
        rx
    }

    /// Tear down: abort in-flight fetches (they resolve as cancelled) and stop the timers.
    pub async fn shutdown(&self) {
        self.session.abort();
        let mut timers = self.timers.lock().await;
        for handle in timers.drain(..) {
            handle.abort();
        }
        tracing::debug!("Client shut down");
    }
}

fn spawn_timer(period: Duration, tick: Tick, tx: mpsc::Sender<Tick>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if tx.send(tick).await.is_err() {
                break;
            }
        }
    })
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct FxClientBuilder {
    endpoints: Endpoints,
    cache_dir: Option<PathBuf>,
    refresh_interval: Duration,
    currency_list_ttl: Duration,
    fetch_batch: usize,
    request_timeout: Duration,
    baseline: BaselinePolicy,
    dates: DatePlan,
    session: Option<Arc<dyn JsonSession>>,
    clock: Option<Arc<dyn Clock>>,
    settings: Option<Arc<dyn SettingsSource>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl Default for FxClientBuilder {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            cache_dir: None,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            currency_list_ttl: DEFAULT_CURRENCY_LIST_TTL,
            fetch_batch: DEFAULT_FETCH_BATCH,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            baseline: BaselinePolicy::default(),
            dates: DatePlan::default(),
            session: None,
            clock: None,
            settings: None,
            notifier: None,
        }
    }
}

impl FxClientBuilder {
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn currency_list_ttl(mut self, ttl: Duration) -> Self {
        self.currency_list_ttl = ttl;
        self
    }

    pub fn fetch_batch(mut self, width: usize) -> Self {
        self.fetch_batch = width;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn baseline(mut self, baseline: BaselinePolicy) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn dates(mut self, plan: DatePlan) -> Self {
        self.dates = plan;
        self
    }

    /// Use a custom session instead of the built-in reqwest one.
    pub fn session(mut self, session: Arc<dyn JsonSession>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn settings(mut self, settings: Arc<dyn SettingsSource>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<FxClient, FxError> {
        let cache_dir = match self.cache_dir {
            Some(dir) => dir,
            None => default_cache_dir().ok_or(StoreError::NoCacheDir)?,
        };

        let config = FxConfig {
            endpoints: self.endpoints,
            cache_dir,
            refresh_interval: self.refresh_interval,
            currency_list_ttl: self.currency_list_ttl,
            fetch_batch: self.fetch_batch,
            request_timeout: self.request_timeout,
            baseline: self.baseline,
            dates: self.dates,
        };
        config.validate()?;

        let session = match self.session {
            Some(session) => session,
            None => default_session(config.request_timeout)?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let settings = self
            .settings
            .unwrap_or_else(|| Arc::new(MemorySettings::with_pair(FALLBACK_BASE, FALLBACK_TARGET)));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(NullNotifier));

        let store = HistoryStore::new(config.cache_dir.clone(), clock.clone());
        let provider = ProviderClient::new(session.clone(), config.endpoints.clone());
        let synchronizer = HistorySynchronizer::new(provider.clone(), store.clone(), clock.clone())
            .with_refresh_interval(config.refresh_interval)
            .with_fetch_batch(config.fetch_batch)
            .with_baseline(config.baseline)
            .with_plan(config.dates);

        Ok(FxClient {
            config: Arc::new(config),
            session,
            clock,
            store,
            provider,
            synchronizer,
            settings,
            notifier,
            refresh_locks: Arc::new(Mutex::new(HashMap::new())),
            timers: Arc::new(Mutex::new(Vec::new())),
        })
    }
}

#[cfg(feature = "http")]
fn default_session(timeout: Duration) -> Result<Arc<dyn JsonSession>, FxError> {
    Ok(Arc::new(crate::http::FxHttp::new(timeout)?))
}

#[cfg(not(feature = "http"))]
fn default_session(_timeout: Duration) -> Result<Arc<dyn JsonSession>, FxError> {
    Err(crate::error::ConfigError::Invalid(
        "no session given and the `http` feature is disabled".into(),
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_CURRENCY_KEY, TARGET_CURRENCY_KEY};
    use crate::domain::currency::RecordingNotifier;
    use crate::error::ConfigError;
    use crate::shared::FixedClock;
    use crate::test_utils::{rate_table, ScriptedSession};
    use chrono::{Days, NaiveDate};
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("fx-history-client-{}", uuid::Uuid::new_v4()))
    }

    fn builder(session: &Arc<ScriptedSession>) -> FxClientBuilder {
        FxClient::builder()
            .session(session.clone())
            .endpoints(Endpoints::mirrored("mock://fx"))
            .cache_dir(temp_dir())
            .clock(Arc::new(FixedClock::at_date(today())))
            .dates(DatePlan::daily(3))
    }

    #[test]
    fn test_build_rejects_zero_batch() {
        let session = Arc::new(ScriptedSession::new());
        let err = builder(&session).fetch_batch(0).build().err().unwrap();
        assert!(matches!(err, FxError::Config(ConfigError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_refresh_configured_uses_settings() {
        let session = Arc::new(ScriptedSession::new());
        for i in 0..3 {
            let date = today() - Days::new(i);
            session.respond(
                &format!("mock://fx/primary/{date}/eur.min.json"),
                Ok(rate_table("eur", "gbp", 0.87)),
            );
        }
        let settings = Arc::new(MemorySettings::with_pair("EUR", "gbp"));
        let client = builder(&session).settings(settings).build().unwrap();

        let outcome = client.history().refresh_configured(false).await.unwrap();
        assert_eq!(outcome.pair.slug(), "eur-gbp");
        assert_eq!(outcome.points.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_setting_is_config_error() {
        let session = Arc::new(ScriptedSession::new());
        let settings = Arc::new(MemorySettings::new());
        let client = builder(&session).settings(settings).build().unwrap();

        let err = client.history().refresh_configured(false).await.unwrap_err();
        assert!(matches!(err, FxError::Config(ConfigError::Missing(BASE_CURRENCY_KEY))));
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_of_one_pair_do_not_duplicate_fetches() {
        let session = Arc::new(ScriptedSession::new());
        for i in 0..3 {
            let date = today() - Days::new(i);
            session.respond(
                &format!("mock://fx/primary/{date}/usd.min.json"),
                Ok(rate_table("usd", "zar", 18.0)),
            );
        }
        let client = builder(&session).build().unwrap();
        let pair = CurrencyPair::parse("usd", "zar").unwrap();

        let (first, second) = (client.history(), client.history());
        let (a, b) = tokio::join!(first.refresh(&pair, false), second.refresh(&pair, false));
        assert_eq!(a.unwrap().points.len(), 3);
        assert_eq!(b.unwrap().fetched, 0);
        assert_eq!(session.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_currency_refresh_resets_unsupported_target() {
        let session = Arc::new(ScriptedSession::new());
        session.respond(
            "mock://fx/primary/latest/currencies.min.json",
            Ok(json!({ "usd": "US Dollar", "eur": "Euro" })),
        );
        let settings = Arc::new(MemorySettings::with_pair("eur", "xyz"));
        let notifier = Arc::new(RecordingNotifier::new());
        let client = builder(&session)
            .settings(settings.clone())
            .notifier(notifier.clone())
            .build()
            .unwrap();

        let list = client.currencies().refresh(true).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(settings.get_string(TARGET_CURRENCY_KEY).as_deref(), Some("usd"));
        assert_eq!(
            notifier.bodies(),
            vec![
                "Updating currency list…",
                "Currency list updated!",
                "XYZ is no longer supported; reset."
            ]
        );
    }

    #[tokio::test]
    async fn test_fresh_currency_list_skips_network() {
        let session = Arc::new(ScriptedSession::new());
        session.respond(
            "mock://fx/primary/latest/currencies.min.json",
            Ok(json!({ "usd": "US Dollar", "zar": "South African Rand" })),
        );
        let client = builder(&session).build().unwrap();

        client.currencies().refresh(false).await.unwrap();
        session.clear_calls();
        let list = client.currencies().refresh(false).await.unwrap();
        assert!(session.calls().is_empty());
        assert!(list.contains("zar"));
        assert_eq!(client.currencies().cached().await, Some(list));
    }

    #[tokio::test]
    async fn test_failed_forced_currency_refresh_notifies_once() {
        let session = Arc::new(ScriptedSession::new());
        let settings = Arc::new(MemorySettings::with_pair("usd", "zar"));
        let notifier = Arc::new(RecordingNotifier::new());
        let client = builder(&session)
            .settings(settings.clone())
            .notifier(notifier.clone())
            .build()
            .unwrap();

        assert!(client.currencies().refresh(true).await.is_err());
        assert_eq!(
            notifier.bodies(),
            vec!["Updating currency list…", "Failed to update currency list."]
        );
        assert_eq!(settings.get_string(BASE_CURRENCY_KEY).as_deref(), Some("usd"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_tick_and_stop_on_shutdown() {
        let session = Arc::new(ScriptedSession::new());
        let client = builder(&session)
            .refresh_interval(Duration::from_secs(60))
            .currency_list_ttl(Duration::from_secs(150))
            .build()
            .unwrap();

        let mut rx = client.start_timers().await;
        assert_eq!(rx.recv().await, Some(Tick::Rates));
        assert_eq!(rx.recv().await, Some(Tick::Rates));
        assert_eq!(rx.recv().await, Some(Tick::CurrencyList));

        client.shutdown().await;
        while rx.recv().await.is_some() {}
        assert!(session.is_aborted());
    }
}
