//! Unified error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum FxError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Operation was cancelled")]
    Cancelled,
}

impl FxError {
    /// Cancellation is expected during shutdown and must not be reported as a failure.
    pub fn is_cancelled(&self) -> bool {
        match self {
            FxError::Cancelled => true,
            FxError::Http(e) => e.is_cancelled(),
            FxError::Fetch(e) => e.is_cancelled(),
            FxError::Provider(e) => e.is_cancelled(),
            _ => false,
        }
    }
}

/// HTTP-layer errors produced by a [`JsonSession`](crate::http::JsonSession).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Empty response from {url}")]
    EmptyResponse { url: String },

    #[error("Malformed JSON from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("Request was cancelled")]
    Cancelled,
}

impl HttpError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, HttpError::Cancelled)
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        HttpError::Network(e.to_string())
    }
}

/// Why a single endpoint attempt did not yield a rate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("No {base}/{target} rate in response")]
    NoData { base: String, target: String },
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Http(e) if e.is_cancelled())
    }
}

/// Both endpoints failed for one date; carries the last underlying cause.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Rate fetch for {date} failed: {cause}")]
pub struct ProviderError {
    pub date: NaiveDate,
    #[source]
    pub cause: FetchError,
}

impl ProviderError {
    pub fn is_cancelled(&self) -> bool {
        self.cause.is_cancelled()
    }
}

/// Cache storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("No user cache directory available")]
    NoCacheDir,
}

/// Configuration errors, raised at the boundary before anything enters the core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing setting: {0}")]
    Missing(&'static str),

    #[error("Invalid currency identifier for {key}: {value:?}")]
    InvalidIdentifier { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_recognized_through_layers() {
        let provider = ProviderError {
            date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            cause: FetchError::Http(HttpError::Cancelled),
        };
        assert!(provider.is_cancelled());
        assert!(FxError::from(provider).is_cancelled());
        assert!(FxError::Cancelled.is_cancelled());
        assert!(FxError::from(HttpError::Cancelled).is_cancelled());
        assert!(FxError::from(FetchError::Http(HttpError::Cancelled)).is_cancelled());
    }

    #[test]
    fn test_data_errors_are_not_cancellation() {
        let provider = ProviderError {
            date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            cause: FetchError::NoData {
                base: "usd".into(),
                target: "zar".into(),
            },
        };
        assert!(!provider.is_cancelled());
        assert!(!FxError::from(HttpError::Network("dns".into())).is_cancelled());
    }

    #[test]
    fn test_missing_rate_keeps_its_kind_at_the_top() {
        let err = FxError::from(FetchError::NoData {
            base: "usd".into(),
            target: "zar".into(),
        });
        assert!(matches!(err, FxError::Fetch(FetchError::NoData { .. })));
        assert!(!err.is_cancelled());
        assert_eq!(err.to_string(), "Fetch error: No usd/zar rate in response");
    }

    #[test]
    fn test_provider_error_message_names_date_and_cause() {
        let err = ProviderError {
            date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            cause: FetchError::Http(HttpError::Status {
                status: 404,
                url: "https://x/y".into(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "Rate fetch for 2026-03-04 failed: HTTP 404 for https://x/y"
        );
    }
}
