//! Feed data handling
//!
//! - **feed**: decoding of the daily rates XML document
//! - **sources**: where per-day records come from (HTTP feed, in-memory)

pub mod feed;
pub mod sources;

pub use sources::{CbrDailySource, InMemoryRateSource, RateSource};
