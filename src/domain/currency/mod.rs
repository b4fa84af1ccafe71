//! Currency domain — the supported-currency list and settings validation.

pub mod client;

use crate::config::{SettingsSource, BASE_CURRENCY_KEY, TARGET_CURRENCY_KEY};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Title used for every user notification.
pub const NOTIFICATION_TITLE: &str = "Currency Converter";

/// Safe base currency after a reset.
pub const FALLBACK_BASE: &str = "usd";
/// Safe target currency when the base is [`FALLBACK_BASE`].
pub const FALLBACK_TARGET: &str = "zar";

/// Supported identifiers mapped to display names, e.g. `usd → "US Dollar"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyList {
    names: BTreeMap<String, String>,
}

impl CurrencyList {
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(&code.to_ascii_lowercase())
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.names
            .get(&code.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Identifiers in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.names.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for CurrencyList {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(code, name)| (code.to_ascii_lowercase(), name))
                .collect(),
        }
    }
}

// ─── Notifications ───────────────────────────────────────────────────────────

/// User-facing notification sink owned by the presentation layer.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}

/// Keeps every notification body in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    bodies: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, _title: &str, body: &str) {
        self.bodies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(body.to_string());
    }
}

// ─── Settings validation ─────────────────────────────────────────────────────

/// One setting that was reset because its identifier left the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingReset {
    pub key: &'static str,
    pub from: String,
    pub to: String,
}

/// Reset configured identifiers that `list` no longer supports.
///
/// The base goes first, so a reset target is chosen against the already
/// corrected base. An empty list validates nothing.
pub fn validate_settings(
    settings: &dyn SettingsSource,
    list: &CurrencyList,
    notifier: &dyn Notifier,
) -> Vec<SettingReset> {
    let mut resets = Vec::new();
    if list.is_empty() {
        return resets;
    }

    resets.extend(reset_if_unsupported(
        settings,
        list,
        notifier,
        BASE_CURRENCY_KEY,
        FALLBACK_BASE,
    ));

    let base = settings.get_string(BASE_CURRENCY_KEY).unwrap_or_default();
    let target_fallback = if base.eq_ignore_ascii_case(FALLBACK_BASE) {
        FALLBACK_TARGET
    } else {
        FALLBACK_BASE
    };
    resets.extend(reset_if_unsupported(
        settings,
        list,
        notifier,
        TARGET_CURRENCY_KEY,
        target_fallback,
    ));

    resets
}

fn reset_if_unsupported(
    settings: &dyn SettingsSource,
    list: &CurrencyList,
    notifier: &dyn Notifier,
    key: &'static str,
    fallback: &str,
) -> Option<SettingReset> {
    let current = settings.get_string(key).unwrap_or_default();
    if list.contains(current.trim()) {
        return None;
    }

    tracing::warn!(key, value = %current, reset_to = fallback, "Unsupported currency reset");
    notifier.notify(
        NOTIFICATION_TITLE,
        &format!("{} is no longer supported; reset.", current.trim().to_uppercase()),
    );
    settings.set_string(key, fallback);

    Some(SettingReset {
        key,
        from: current,
        to: fallback.to_string(),
    })
}
