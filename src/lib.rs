//! # fx-history
//!
//! Exchange-rate history for a currency pair: a per-pair on-disk cache that is
//! filled by bounded batches of dated fetches, plus a pure line-chart renderer.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared types, date generation, rates, history, currency list (no I/O of its own)
//! 2. **Render** — `ChartRenderer`, points in and draw instructions out
//! 3. **HTTP** — `JsonSession` seam and the reqwest-backed `FxHttp`
//! 4. **High-Level Client** — `FxClient` with nested sub-clients, timers and shutdown
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fx_history::prelude::*;
//!
//! let client = FxClient::builder().build()?;
//! let pair = CurrencyPair::parse("usd", "zar")?;
//!
//! let outcome = client.history().refresh(&pair, false).await?;
//! let ops = render(&outcome.points, ZoomWindow::Medium, 500.0, 250.0, client.clock().today());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, clock and formatting used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, state, sub-clients.
pub mod domain;

/// Unified error types.
pub mod error;

/// Provider URL templates.
pub mod network;

/// Typed configuration and the settings accessor.
pub mod config;

// ── Layer 2: Render ──────────────────────────────────────────────────────────

/// Line chart draw instructions.
pub mod chart;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Abortable JSON session.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `FxClient` — the primary entry point.
pub mod client;

#[cfg(test)]
mod test_utils;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Clock, CurrencyCode, CurrencyPair, FixedClock, SystemClock};

    // Domain types — dates
    pub use crate::domain::dates::{DatePlan, Lookback, ZoomWindow};

    // Domain types — history
    pub use crate::domain::history::{
        BaselinePolicy, ChartPoint, DatedRate, HistoryStore, HistorySynchronizer, RateSeries,
        RefreshOutcome,
    };

    // Domain types — rates, currency list, display
    pub use crate::domain::currency::{CurrencyList, Notifier, NullNotifier, SettingReset};
    pub use crate::domain::display::{Direction, PanelStatus, PanelSummary, RateChange};
    pub use crate::domain::rates::{BatchFetcher, ProviderClient};

    // Chart
    pub use crate::chart::{render, ChartRenderer, ChartStyle, DrawOp};

    // Errors
    pub use crate::error::{FxError, HttpError, StoreError};

    // Config + network
    pub use crate::config::{FxConfig, MemorySettings, SettingsSource};
    pub use crate::network::Endpoints;

    // HTTP session + client
    pub use crate::http::JsonSession;
    #[cfg(feature = "http")]
    pub use crate::http::FxHttp;
    pub use crate::client::{CurrenciesClient, FxClient, FxClientBuilder, HistoryClient, Tick};
}
