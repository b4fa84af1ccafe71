//! Rates domain — single-date fetches with endpoint fallback, and bounded batches.

pub mod batch;
pub mod wire;

pub use batch::BatchFetcher;

use crate::error::{FetchError, ProviderError};
use crate::http::JsonSession;
use crate::network::{DateTag, Endpoints};
use crate::shared::CurrencyPair;

use chrono::NaiveDate;
use std::sync::Arc;

/// Fetches one date's rate, falling back to the secondary endpoint once.
///
/// Never retries beyond the two endpoints; how many dates get attempted is the
/// caller's business.
#[derive(Clone)]
pub struct ProviderClient {
    session: Arc<dyn JsonSession>,
    endpoints: Endpoints,
}

impl ProviderClient {
    pub fn new(session: Arc<dyn JsonSession>, endpoints: Endpoints) -> Self {
        Self { session, endpoints }
    }

    pub fn session(&self) -> &Arc<dyn JsonSession> {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The rate for `pair` on `date`.
    pub async fn fetch_rate(
        &self,
        date: NaiveDate,
        pair: &CurrencyPair,
    ) -> Result<f64, ProviderError> {
        self.fetch_tagged(DateTag::Day(date), pair)
            .await
            .map_err(|cause| ProviderError { date, cause })
    }

    /// The provider's most recent rate, read through the `latest` snapshot.
    pub async fn fetch_latest_rate(&self, pair: &CurrencyPair) -> Result<f64, FetchError> {
        self.fetch_tagged(DateTag::Latest, pair).await
    }

    async fn fetch_tagged(&self, tag: DateTag, pair: &CurrencyPair) -> Result<f64, FetchError> {
        let base = pair.base.as_str();
        let primary_url = self.endpoints.primary_rates_url(tag, base);

        let primary_err = match self.attempt(&primary_url, pair).await {
            Ok(rate) => return Ok(rate),
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => e,
        };

        tracing::debug!(
            date = %tag,
            pair = %pair,
            error = %primary_err,
            "Primary endpoint failed, trying fallback"
        );

        let fallback_url = self.endpoints.fallback_rates_url(tag, base);
        self.attempt(&fallback_url, pair).await
    }

    async fn attempt(&self, url: &str, pair: &CurrencyPair) -> Result<f64, FetchError> {
        let body = self.session.get_json(url).await?;
        wire::extract_rate(&body, pair)
    }

    /// The currency list as (identifier, display name) pairs, primary then fallback.
    pub async fn fetch_currency_names(&self) -> Result<Vec<(String, String)>, FetchError> {
        let primary_url = self.endpoints.primary_currencies_url();
        match self.attempt_names(&primary_url).await {
            Ok(names) => return Ok(names),
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "Primary currency list failed, trying fallback");
            }
        }
        self.attempt_names(&self.endpoints.fallback_currencies_url())
            .await
    }

    async fn attempt_names(&self, url: &str) -> Result<Vec<(String, String)>, FetchError> {
        let body = self.session.get_json(url).await?;
        wire::currency_names(&body).ok_or_else(|| FetchError::NoData {
            base: "currencies".to_string(),
            target: "names".to_string(),
        })
    }
}
