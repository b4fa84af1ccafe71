//! Bounded-concurrency batch fetching over many dates.

use super::ProviderClient;
use crate::error::FxError;
use crate::shared::CurrencyPair;

use chrono::NaiveDate;
use futures_util::future::join_all;
use std::collections::BTreeMap;

/// Drives a [`ProviderClient`] over a list of dates, `width` at a time.
///
/// Each chunk fully settles before the next starts, so at most `width`
/// requests are outstanding at any moment. Dates that fail are left out of the
/// result; they stay missing and get picked up by the next pass.
pub struct BatchFetcher<'a> {
    provider: &'a ProviderClient,
    width: usize,
}

impl<'a> BatchFetcher<'a> {
    pub fn new(provider: &'a ProviderClient, width: usize) -> Self {
        Self {
            provider,
            width: width.max(1),
        }
    }

    /// Fetch every date in `dates`, returning the ones that resolved.
    ///
    /// Fails only when the whole operation is cancelled.
    pub async fn fetch_missing(
        &self,
        dates: &[NaiveDate],
        pair: &CurrencyPair,
    ) -> Result<BTreeMap<NaiveDate, f64>, FxError> {
        let mut out = BTreeMap::new();

        for chunk in dates.chunks(self.width) {
            if self.provider.session().is_aborted() {
                return Err(FxError::Cancelled);
            }

            let results = join_all(
                chunk
                    .iter()
                    .map(|date| self.provider.fetch_rate(*date, pair)),
            )
            .await;

            let mut cancelled = false;
            for (date, result) in chunk.iter().zip(results) {
                match result {
                    Ok(rate) => {
                        out.insert(*date, rate);
                    }
                    Err(e) if e.is_cancelled() => cancelled = true,
                    Err(e) => {
                        tracing::debug!(date = %date, pair = %pair, error = %e, "Date omitted");
                    }
                }
            }

            if cancelled {
                return Err(FxError::Cancelled);
            }
        }

        Ok(out)
    }
}
