//! History domain — the cached per-pair series and the refresh pass that fills it.

pub mod client;
pub mod state;
pub mod store;
pub mod sync;
pub mod wire;

use crate::shared::CurrencyPair;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use state::RateSeries;
pub use store::HistoryStore;
pub use sync::HistorySynchronizer;

/// One plotted point. Sequences of these are always oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// A rate together with the date it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedRate {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Which stored date the latest rate is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaselinePolicy {
    /// The day before today, whether or not today itself resolved.
    #[default]
    PreviousDaily,
    /// The newest stored date strictly older than the latest one.
    MostRecentOlder,
}

/// Result of one synchronization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub pair: CurrencyPair,
    /// Every required date with a known value, oldest first.
    pub points: Vec<ChartPoint>,
    /// The newest required date's rate. `None` means no data.
    pub latest: Option<DatedRate>,
    pub previous: Option<DatedRate>,
    /// Dates newly fetched during this pass.
    pub fetched: usize,
    /// Required dates still missing after this pass.
    pub unresolved: usize,
}

impl RefreshOutcome {
    pub fn is_no_data(&self) -> bool {
        self.latest.is_none()
    }
}
