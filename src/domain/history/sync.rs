//! The refresh pass: load, invalidate today, fetch what is missing, merge, persist.

use super::store::{today_marker_key, HistoryStore};
use super::{BaselinePolicy, ChartPoint, DatedRate, RateSeries, RefreshOutcome};
use crate::config::{DEFAULT_FETCH_BATCH, DEFAULT_REFRESH_INTERVAL};
use crate::domain::dates::DatePlan;
use crate::domain::rates::{BatchFetcher, ProviderClient};
use crate::error::FxError;
use crate::shared::{Clock, CurrencyPair};

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

/// Brings one pair's stored series up to date and derives the display view.
///
/// Never mutates shared state other than through the store, whose writes are
/// atomic replacements. Overlapping passes for the same pair converge, since a
/// merge only adds keys.
#[derive(Clone)]
pub struct HistorySynchronizer {
    provider: ProviderClient,
    store: HistoryStore,
    clock: Arc<dyn Clock>,
    refresh_interval: Duration,
    fetch_batch: usize,
    baseline: BaselinePolicy,
    plan: DatePlan,
}

impl HistorySynchronizer {
    pub fn new(provider: ProviderClient, store: HistoryStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            store,
            clock,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            fetch_batch: DEFAULT_FETCH_BATCH,
            baseline: BaselinePolicy::default(),
            plan: DatePlan::default(),
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_fetch_batch(mut self, width: usize) -> Self {
        self.fetch_batch = width;
        self
    }

    pub fn with_baseline(mut self, baseline: BaselinePolicy) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_plan(mut self, plan: DatePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Run one pass for `pair`. `bust_today` forces today's value to be re-fetched.
    ///
    /// Only an operation-level failure (cancellation) is an error. Dates that
    /// could not be fetched are simply absent from the outcome.
    pub async fn refresh(
        &self,
        pair: &CurrencyPair,
        bust_today: bool,
    ) -> Result<RefreshOutcome, FxError> {
        let mut series = self.store.load(pair).await;
        let today = self.clock.today();
        let (required, dense) = self.plan.required(today);

        if let Some(newest) = required.first() {
            self.invalidate_today(pair, &mut series, *newest, bust_today)
                .await;
        }

        let missing: Vec<NaiveDate> = required
            .iter()
            .filter(|date| !series.contains(date))
            .copied()
            .collect();

        let mut fetched = 0;
        if !missing.is_empty() {
            let results = match BatchFetcher::new(&self.provider, self.fetch_batch)
                .fetch_missing(&missing, pair)
                .await
            {
                Ok(results) => results,
                Err(e) => {
                    if e.is_cancelled() {
                        tracing::debug!(pair = %pair, "Refresh cancelled");
                    } else {
                        tracing::error!(pair = %pair, error = %e, "Refresh failed");
                    }
                    return Err(e);
                }
            };
            fetched = series.merge(results);

            if let Err(e) = self.store.save(pair, &series).await {
                tracing::warn!(pair = %pair, error = %e, "Failed to persist history");
            }
        }

        let unresolved = required
            .iter()
            .filter(|date| !series.contains(date))
            .count();

        tracing::info!(
            pair = %pair,
            required = required.len(),
            missing = missing.len(),
            fetched,
            unresolved,
            "History refreshed"
        );

        let latest = required
            .first()
            .and_then(|date| series.get(date).map(|rate| DatedRate { date: *date, rate }));
        let previous = self.baseline_for(&series, latest.as_ref(), &dense);

        Ok(RefreshOutcome {
            pair: pair.clone(),
            points: chart_points(&series, &required),
            latest,
            previous,
            fetched,
            unresolved,
        })
    }

    async fn invalidate_today(
        &self,
        pair: &CurrencyPair,
        series: &mut RateSeries,
        today: NaiveDate,
        bust_today: bool,
    ) {
        let key = today_marker_key(pair);
        let recently_busted = self
            .store
            .read_marker::<bool>(&key, Some(self.refresh_interval))
            .await
            .unwrap_or(false);

        if !bust_today && recently_busted {
            return;
        }

        if series.evict(&today).is_some() {
            tracing::debug!(pair = %pair, date = %today, "Evicted today's rate");
        }
        if let Err(e) = self.store.write_marker(&key, &true).await {
            tracing::warn!(pair = %pair, error = %e, "Failed to write today marker");
        }
    }

    fn baseline_for(
        &self,
        series: &RateSeries,
        latest: Option<&DatedRate>,
        dense: &[NaiveDate],
    ) -> Option<DatedRate> {
        match self.baseline {
            BaselinePolicy::PreviousDaily => dense
                .get(1)
                .and_then(|date| series.get(date).map(|rate| DatedRate { date: *date, rate })),
            BaselinePolicy::MostRecentOlder => latest
                .and_then(|l| series.latest_before(&l.date))
                .map(|(date, rate)| DatedRate { date, rate }),
        }
    }
}

/// Every required date with a known value, oldest first.
fn chart_points(series: &RateSeries, required: &[NaiveDate]) -> Vec<ChartPoint> {
    required
        .iter()
        .rev()
        .filter_map(|date| series.get(date).map(|rate| ChartPoint { date: *date, rate }))
        .collect()
}
