//! History sub-client — per-pair serialized refresh and cached reads.

use crate::client::FxClient;
use crate::domain::history::{RateSeries, RefreshOutcome};
use crate::error::FxError;
use crate::shared::CurrencyPair;

use std::sync::Arc;

/// Sub-client for history operations.
pub struct History<'a> {
    pub(crate) client: &'a FxClient,
}

impl<'a> History<'a> {
    /// Synchronize `pair` and return the display view.
    ///
    /// Calls for the same pair queue behind each other; different pairs run
    /// independently.
    pub async fn refresh(
        &self,
        pair: &CurrencyPair,
        bust_today: bool,
    ) -> Result<RefreshOutcome, FxError> {
        let lock = self.lock_for(pair).await;
        let _guard = lock.lock().await;
        self.client.synchronizer.refresh(pair, bust_today).await
    }

    /// Refresh the pair currently configured in the client's settings.
    pub async fn refresh_configured(&self, bust_today: bool) -> Result<RefreshOutcome, FxError> {
        let pair = CurrencyPair::from_settings(self.client.settings.as_ref())?;
        self.refresh(&pair, bust_today).await
    }

    /// The persisted series for `pair`, without touching the network.
    pub async fn cached(&self, pair: &CurrencyPair) -> RateSeries {
        self.client.store.load(pair).await
    }

    async fn lock_for(&self, pair: &CurrencyPair) -> Arc<async_lock::Mutex<()>> {
        let mut locks = self.client.refresh_locks.lock().await;
        locks
            .entry(pair.clone())
            .or_insert_with(|| Arc::new(async_lock::Mutex::new(())))
            .clone()
    }
}
