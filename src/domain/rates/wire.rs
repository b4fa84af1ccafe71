//! Wire shapes of the provider's rate tables.
//!
//! A rate table looks like
//! `{ "date": "2026-10-18", "usd": { "eur": 0.86, "zar": 17.4, ... } }`.

use crate::error::FetchError;
use crate::shared::CurrencyPair;

/// Pull `body[base][target]` out of a rate table.
///
/// A missing key path, a `null`, or a value that is not a finite non-negative
/// number all count as no data.
pub fn extract_rate(body: &serde_json::Value, pair: &CurrencyPair) -> Result<f64, FetchError> {
    body.get(pair.base.as_str())
        .and_then(|table| table.get(pair.target.as_str()))
        .and_then(serde_json::Value::as_f64)
        .filter(|rate| rate.is_finite() && *rate >= 0.0)
        .ok_or_else(|| FetchError::NoData {
            base: pair.base.to_string(),
            target: pair.target.to_string(),
        })
}

/// The key set of a currency list body (`{ "usd": "US Dollar", ... }`).
pub fn currency_names(body: &serde_json::Value) -> Option<Vec<(String, String)>> {
    let map = body.as_object()?;
    Some(
        map.iter()
            .map(|(code, name)| (code.clone(), name.as_str().unwrap_or_default().to_string()))
            .collect(),
    )
}
