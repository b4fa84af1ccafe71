//! reqwest-backed session — `FxHttp`.
//!
//! One shared connection pool plus an abort signal. Aborting resolves every
//! in-flight request with [`HttpError::Cancelled`] and refuses new ones.

use crate::error::HttpError;
use crate::http::session::{parse_body, JsonSession};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::watch;

/// Abortable HTTP session for the provider endpoints.
pub struct FxHttp {
    client: Client,
    abort_tx: watch::Sender<bool>,
}

impl FxHttp {
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .build()?;
        let (abort_tx, _) = watch::channel(false);
        Ok(Self { client, abort_tx })
    }

    async fn do_get(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().await?;
        parse_body(url, &body)
    }
}

#[async_trait]
impl JsonSession for FxHttp {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, HttpError> {
        let mut abort_rx = self.abort_tx.subscribe();
        if *abort_rx.borrow() {
            return Err(HttpError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = abort_rx.wait_for(|aborted| *aborted) => Err(HttpError::Cancelled),
            result = self.do_get(url) => {
                tracing::trace!(url, ok = result.is_ok(), "GET finished");
                result
            }
        }
    }

    fn abort(&self) {
        self.abort_tx.send_replace(true);
    }

    fn is_aborted(&self) -> bool {
        *self.abort_tx.borrow()
    }
}
