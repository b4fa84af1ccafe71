//! Human-readable formatting for rates and dates.

pub mod date;
pub mod num;
