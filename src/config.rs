//! Typed configuration and the presentation layer's settings accessor.

use crate::domain::dates::{DatePlan, Lookback};
use crate::domain::history::BaselinePolicy;
use crate::error::ConfigError;
use crate::network::Endpoints;
use crate::shared::CurrencyPair;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

/// Settings key holding the base currency identifier.
pub const BASE_CURRENCY_KEY: &str = "base-currency";
/// Settings key holding the target currency identifier.
pub const TARGET_CURRENCY_KEY: &str = "target-currency";

/// Auto-refresh period, also the max age of the "today refreshed" marker.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);
/// Max age of the cached currency list.
pub const DEFAULT_CURRENCY_LIST_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Concurrent provider requests per batch chunk.
pub const DEFAULT_FETCH_BATCH: usize = 8;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory name under the user cache dir.
pub const CACHE_DIR_NAME: &str = "fx-history";

/// Validated configuration owned by [`FxClient`](crate::client::FxClient).
#[derive(Debug, Clone)]
pub struct FxConfig {
    pub endpoints: Endpoints,
    pub cache_dir: PathBuf,
    pub refresh_interval: Duration,
    pub currency_list_ttl: Duration,
    pub fetch_batch: usize,
    pub request_timeout: Duration,
    pub baseline: BaselinePolicy,
    /// Windows the refresh pass keeps filled.
    pub dates: DatePlan,
}

impl FxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_batch == 0 {
            return Err(ConfigError::Invalid("fetch_batch must be at least 1".into()));
        }
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::Invalid("refresh_interval must be non-zero".into()));
        }
        if matches!(self.dates.dense, Lookback::Days(0)) {
            return Err(ConfigError::Invalid("dense window must cover today".into()));
        }
        if self.currency_list_ttl.is_zero() {
            return Err(ConfigError::Invalid("currency_list_ttl must be non-zero".into()));
        }
        Ok(())
    }
}

/// The default cache location, `<user cache dir>/fx-history`.
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(CACHE_DIR_NAME))
}

// ─── Settings accessor ───────────────────────────────────────────────────────

/// String settings owned by the presentation layer.
pub trait SettingsSource: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str);
}

impl CurrencyPair {
    /// Read the configured pair, validating identifiers at the boundary.
    pub fn from_settings(settings: &dyn SettingsSource) -> Result<Self, ConfigError> {
        let base = settings
            .get_string(BASE_CURRENCY_KEY)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing(BASE_CURRENCY_KEY))?;
        let target = settings
            .get_string(TARGET_CURRENCY_KEY)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing(TARGET_CURRENCY_KEY))?;
        CurrencyPair::parse(&base, &target)
    }
}

/// In-memory [`SettingsSource`].
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(base: &str, target: &str) -> Self {
        let settings = Self::new();
        settings.set_string(BASE_CURRENCY_KEY, base);
        settings.set_string(TARGET_CURRENCY_KEY, target);
        settings
    }
}

impl SettingsSource for MemorySettings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}
