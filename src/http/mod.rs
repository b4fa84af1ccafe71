//! HTTP layer — the abortable GET-and-parse-JSON session.

pub mod session;

#[cfg(feature = "http")]
pub mod client;

pub use session::JsonSession;

#[cfg(feature = "http")]
pub use client::FxHttp;
