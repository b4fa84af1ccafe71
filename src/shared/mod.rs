//! Shared newtypes and utilities used across all domain modules.
//!
//! Identifiers serialize transparently as the lowercase strings the provider
//! uses in its URLs and response bodies.

pub mod clock;
pub mod fmt;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::error::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// ISO calendar date format used for cache keys and URLs.
pub const ISO_DATE: &str = "%Y-%m-%d";

pub fn iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

// ─── CurrencyCode ────────────────────────────────────────────────────────────

/// A currency identifier as the provider knows it (e.g. `"usd"`, `"zar"`, `"btc"`).
///
/// Identifiers are case-insensitive; the canonical form is lowercase ASCII
/// alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validate and canonicalize. Returns `None` for empty or non-alphanumeric input.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form for display, e.g. `"USD"`.
    pub fn display_upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::parse(s).ok_or_else(|| ConfigError::InvalidIdentifier {
            key: "currency",
            value: s.to_string(),
        })
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CurrencyCode::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid currency code: {s:?}")))
    }
}

// ─── CurrencyPair ────────────────────────────────────────────────────────────

/// The (base, target) pair whose ratio is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: CurrencyCode, target: CurrencyCode) -> Self {
        Self { base, target }
    }

    /// Build from raw strings, validating both sides.
    pub fn parse(base: &str, target: &str) -> Result<Self, ConfigError> {
        let base = CurrencyCode::parse(base).ok_or_else(|| ConfigError::InvalidIdentifier {
            key: crate::config::BASE_CURRENCY_KEY,
            value: base.to_string(),
        })?;
        let target = CurrencyCode::parse(target).ok_or_else(|| ConfigError::InvalidIdentifier {
            key: crate::config::TARGET_CURRENCY_KEY,
            value: target.to_string(),
        })?;
        Ok(Self { base, target })
    }

    /// Cache key suffix, e.g. `"usd-zar"`.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.base, self.target)
    }

    /// Display form, e.g. `"USD/ZAR"`.
    pub fn display_upper(&self) -> String {
        format!("{}/{}", self.base.display_upper(), self.target.display_upper())
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.target)
    }
}
