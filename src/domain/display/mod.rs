//! Display domain — the coarse panel states shown to the user.
//!
//! Nothing here ever carries raw error text. Failures collapse into a small
//! fixed set of labels.

use crate::domain::history::{DatedRate, RefreshOutcome};
use crate::error::FxError;
use crate::shared::fmt::num::{display_rate, fixed};
use crate::shared::CurrencyPair;

use std::fmt;

/// Differences at or below this are shown as unchanged.
pub const UNCHANGED_EPSILON: f64 = 1e-5;

/// Which way the target currency moved against the base.
///
/// A falling rate means one base unit buys less target, so the target got
/// stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Unchanged,
    TargetStronger,
    TargetWeaker,
}

impl Direction {
    pub fn from_diff(diff: f64) -> Self {
        if diff.abs() <= UNCHANGED_EPSILON {
            Direction::Unchanged
        } else if diff < 0.0 {
            Direction::TargetStronger
        } else {
            Direction::TargetWeaker
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Unchanged => "▬",
            Direction::TargetStronger => "▲",
            Direction::TargetWeaker => "▼",
        }
    }

    /// CSS hex colour for the glyph.
    pub fn color(self) -> &'static str {
        match self {
            Direction::Unchanged => "#888",
            Direction::TargetStronger => "#26A269",
            Direction::TargetWeaker => "#E01B24",
        }
    }
}

/// Latest rate against its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateChange {
    pub direction: Direction,
    /// Absolute difference.
    pub magnitude: f64,
}

impl RateChange {
    pub fn between(latest: f64, previous: f64) -> Self {
        let diff = latest - previous;
        Self {
            direction: Direction::from_diff(diff),
            magnitude: diff.abs(),
        }
    }

    /// Magnitude with two decimals, e.g. `0.13`.
    pub fn magnitude_label(&self) -> String {
        fixed(self.magnitude, 2)
    }
}

/// What the panel shows after a successful pass with data.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSummary {
    pub pair: CurrencyPair,
    pub latest: DatedRate,
    /// `None` when the baseline date has no value; the indicator is hidden.
    pub change: Option<RateChange>,
}

impl fmt::Display for PanelSummary {
    /// `USD/ZAR: 18.42`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pair.display_upper(), display_rate(self.latest.rate))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelStatus {
    Loading,
    Updating,
    Ready(PanelSummary),
    NoData,
    Error,
    ConfigError,
}

impl PanelStatus {
    /// The state a finished refresh leads to.
    ///
    /// `None` for a cancelled refresh: the panel keeps whatever it showed.
    pub fn from_result(result: &Result<RefreshOutcome, FxError>) -> Option<Self> {
        match result {
            Ok(outcome) => Some(Self::from_outcome(outcome)),
            Err(e) if e.is_cancelled() => None,
            Err(FxError::Config(_)) => Some(PanelStatus::ConfigError),
            Err(_) => Some(PanelStatus::Error),
        }
    }

    pub fn from_outcome(outcome: &RefreshOutcome) -> Self {
        let Some(latest) = outcome.latest else {
            return PanelStatus::NoData;
        };
        PanelStatus::Ready(PanelSummary {
            pair: outcome.pair.clone(),
            latest,
            change: outcome
                .previous
                .map(|previous| RateChange::between(latest.rate, previous.rate)),
        })
    }

    pub fn label(&self) -> String {
        match self {
            PanelStatus::Loading => "Loading…".to_string(),
            PanelStatus::Updating => "Updating…".to_string(),
            PanelStatus::Ready(summary) => summary.to_string(),
            PanelStatus::NoData => "No data".to_string(),
            PanelStatus::Error => "Error".to_string(),
            PanelStatus::ConfigError => "Config Error".to_string(),
        }
    }
}
