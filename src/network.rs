//! Provider URL templates.
//!
//! Templates use two placeholders: `{date}` (an ISO date or the literal `latest`)
//! and `{base}` (a lowercase currency identifier).

use chrono::NaiveDate;
use std::fmt;

/// Primary per-base rate table on the jsDelivr CDN.
pub const DEFAULT_PRIMARY_RATES_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@{date}/v1/currencies/{base}.min.json";

/// Fallback per-base rate table on Cloudflare Pages.
pub const DEFAULT_FALLBACK_RATES_URL: &str =
    "https://{date}.currency-api.pages.dev/v1/currencies/{base}.min.json";

/// Primary currency list (identifier → display name).
pub const DEFAULT_PRIMARY_CURRENCIES_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@{date}/v1/currencies.min.json";

/// Fallback currency list.
pub const DEFAULT_FALLBACK_CURRENCIES_URL: &str =
    "https://{date}.currency-api.pages.dev/v1/currencies.min.json";

/// Which snapshot of the provider to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTag {
    Day(NaiveDate),
    Latest,
}

impl fmt::Display for DateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTag::Day(d) => f.write_str(&crate::shared::iso_date(*d)),
            DateTag::Latest => f.write_str("latest"),
        }
    }
}

impl From<NaiveDate> for DateTag {
    fn from(d: NaiveDate) -> Self {
        DateTag::Day(d)
    }
}

/// The endpoint set a [`ProviderClient`](crate::domain::rates::ProviderClient) talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub primary_rates: String,
    pub fallback_rates: String,
    pub primary_currencies: String,
    pub fallback_currencies: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            primary_rates: DEFAULT_PRIMARY_RATES_URL.to_string(),
            fallback_rates: DEFAULT_FALLBACK_RATES_URL.to_string(),
            primary_currencies: DEFAULT_PRIMARY_CURRENCIES_URL.to_string(),
            fallback_currencies: DEFAULT_FALLBACK_CURRENCIES_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Both endpoints rooted at a single mirror, e.g. a local mock server.
    ///
    /// Primary becomes `{root}/primary/{date}/{base}.min.json`, fallback
    /// `{root}/fallback/{date}/{base}.min.json`.
    pub fn mirrored(root: &str) -> Self {
        let root = root.trim_end_matches('/');
        Self {
            primary_rates: format!("{root}/primary/{{date}}/{{base}}.min.json"),
            fallback_rates: format!("{root}/fallback/{{date}}/{{base}}.min.json"),
            primary_currencies: format!("{root}/primary/{{date}}/currencies.min.json"),
            fallback_currencies: format!("{root}/fallback/{{date}}/currencies.min.json"),
        }
    }

    pub fn primary_rates_url(&self, date: DateTag, base: &str) -> String {
        expand(&self.primary_rates, date, base)
    }

    pub fn fallback_rates_url(&self, date: DateTag, base: &str) -> String {
        expand(&self.fallback_rates, date, base)
    }

    pub fn primary_currencies_url(&self) -> String {
        expand(&self.primary_currencies, DateTag::Latest, "")
    }

    pub fn fallback_currencies_url(&self) -> String {
        expand(&self.fallback_currencies, DateTag::Latest, "")
    }
}

fn expand(template: &str, date: DateTag, base: &str) -> String {
    template
        .replace("{date}", &date.to_string())
        .replace("{base}", base)
}
