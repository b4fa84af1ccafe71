//! The session seam between the core and the network.

use crate::error::HttpError;
use async_trait::async_trait;

/// An asynchronous GET-and-parse-JSON primitive that can be aborted.
///
/// After [`abort`](JsonSession::abort), every in-flight and future request
/// resolves with [`HttpError::Cancelled`].
#[async_trait]
pub trait JsonSession: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, HttpError>;

    fn abort(&self);

    fn is_aborted(&self) -> bool;
}

/// Parse a response body, distinguishing empty bodies from malformed JSON.
pub fn parse_body(url: &str, body: &[u8]) -> Result<serde_json::Value, HttpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(HttpError::EmptyResponse {
            url: url.to_string(),
        });
    }
    serde_json::from_slice(body).map_err(|e| HttpError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
