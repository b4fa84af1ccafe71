//! Currencies sub-client — TTL-cached currency list.

use super::{validate_settings, CurrencyList, NOTIFICATION_TITLE};
use crate::client::FxClient;
use crate::domain::history::store::CURRENCY_LIST_KEY;
use crate::error::FxError;

/// Sub-client for the supported-currency list.
pub struct Currencies<'a> {
    pub(crate) client: &'a FxClient,
}

impl<'a> Currencies<'a> {
    /// Make sure the currency list is fresh and the configured pair still valid.
    ///
    /// Without `force`, a list younger than the configured TTL is returned as is
    /// and nothing else happens. A forced refresh talks to the user through the
    /// client's notifier; a background one stays silent unless a setting is reset.
    pub async fn refresh(&self, force: bool) -> Result<CurrencyList, FxError> {
        let store = &self.client.store;
        let notifier = self.client.notifier.as_ref();

        if !force {
            let ttl = Some(self.client.config.currency_list_ttl);
            if let Some(list) = store.read_marker::<CurrencyList>(CURRENCY_LIST_KEY, ttl).await {
                return Ok(list);
            }
        }

        if force {
            notifier.notify(NOTIFICATION_TITLE, "Updating currency list…");
        }

        let list: CurrencyList = match self.client.provider.fetch_currency_names().await {
            Ok(names) => names.into_iter().collect(),
            Err(e) => {
                if e.is_cancelled() {
                    tracing::debug!("Currency list fetch cancelled");
                } else {
                    tracing::error!(error = %e, "Currency list fetch failed");
                    if force {
                        notifier.notify(NOTIFICATION_TITLE, "Failed to update currency list.");
                    }
                }
                return Err(e.into());
            }
        };

        if let Err(e) = store.write_marker(CURRENCY_LIST_KEY, &list).await {
            tracing::warn!(error = %e, "Failed to persist currency list");
        }
        tracing::info!(currencies = list.len(), "Currency list updated");
        if force {
            notifier.notify(NOTIFICATION_TITLE, "Currency list updated!");
        }

        validate_settings(self.client.settings.as_ref(), &list, notifier);
        Ok(list)
    }

    /// The last persisted list regardless of age.
    pub async fn cached(&self) -> Option<CurrencyList> {
        self.client
            .store
            .read_marker(CURRENCY_LIST_KEY, None)
            .await
    }
}
