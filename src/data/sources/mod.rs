//! Rate sources
//!
//! - CBR daily: the Central Bank of Russia `XML_daily_eng.asp` feed over HTTP
//! - In-memory: canned per-day responses for offline runs and tests

pub mod cbr;
pub mod in_memory;

pub use cbr::CbrDailySource;
pub use in_memory::{InMemoryDay, InMemoryRateSource};

use crate::error::Result;
use crate::types::RateRecord;
use chrono::NaiveDate;
use std::future::Future;

/// Trait for per-day exchange-rate sources
pub trait RateSource: Send + Sync {
    /// Fetch every admitted record published for `date`.
    ///
    /// An empty vector is a successful day with no usable entries. Errors
    /// for which [`crate::error::RatesError::skips_day`] holds mean the day
    /// contributes nothing.
    fn fetch_day(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<RateRecord>>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}
