//! Durable per-pair history store and TTL-gated markers.
//!
//! One JSON file per logical key under the cache directory, each holding a
//! [`CacheEnvelope`]. Reads never fail past this boundary: a missing, unreadable
//! or corrupt file is reported as absent. Writes go to a unique temporary file
//! that is renamed over the target, so a reader sees either the old or the new
//! blob and never a partial one.

use super::state::RateSeries;
use super::wire::CacheEnvelope;
use crate::error::StoreError;
use crate::shared::{Clock, CurrencyPair};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Key of the currency-list marker.
pub const CURRENCY_LIST_KEY: &str = "currency-list";

pub fn history_key(pair: &CurrencyPair) -> String {
    format!("history-{}", pair.slug())
}

pub fn today_marker_key(pair: &CurrencyPair) -> String {
    format!("today-{}", pair.slug())
}

#[derive(Clone)]
pub struct HistoryStore {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The pair's series, or an empty one if absent or unreadable.
    pub async fn load(&self, pair: &CurrencyPair) -> RateSeries {
        self.read_envelope::<RateSeries>(&history_key(pair))
            .await
            .map(|env| env.data)
            .unwrap_or_default()
    }

    /// Atomically replace the pair's persisted series.
    pub async fn save(&self, pair: &CurrencyPair, series: &RateSeries) -> Result<(), StoreError> {
        self.write_marker(&history_key(pair), series).await
    }

    /// The payload under `key` if present and no older than `max_age`.
    ///
    /// `None` for `max_age` accepts any age.
    pub async fn read_marker<T: DeserializeOwned>(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<T> {
        let env = self.read_envelope::<T>(key).await?;
        match max_age {
            Some(age) if !env.is_fresh(self.clock.unix_seconds(), age.as_secs_f64()) => None,
            _ => Some(env.data),
        }
    }

    /// Wrap `payload` in a fresh envelope and atomically write it under `key`.
    pub async fn write_marker<T: Serialize>(&self, key: &str, payload: &T) -> Result<(), StoreError> {
        let envelope = CacheEnvelope::new(self.clock.unix_seconds(), payload);
        let bytes = serde_json::to_vec(&envelope)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, &target).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read_envelope<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEnvelope<T>> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Cache read failed");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(env) => Some(env),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Ignoring corrupt cache file");
                None
            }
        }
    }
}
