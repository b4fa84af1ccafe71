//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains, where it needs them:
//! - `mod.rs` — Domain types and pure logic
//! - `wire.rs` — Raw serde shapes of provider responses and cache files
//! - `state.rs` — State containers with update methods
//! - `client.rs` — Sub-client reached through `FxClient`

pub mod currency;
pub mod dates;
pub mod display;
pub mod history;
pub mod rates;
