//! # cbr-rates
//!
//! Daily exchange-rate statistics from the Central Bank of Russia XML feed.
//!
//! A run walks a lookback window of dates, fetches one feed document per
//! date, folds every admitted rate into per-currency averages and global
//! extremes, then renders a report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cbr_rates::prelude::*;
//!
//! # async fn demo() -> cbr_rates::error::Result<()> {
//! let config = RunConfig::default();
//! let source = CbrDailySource::from_config(&config)?;
//! let collector = RateCollector::new(source, config);
//!
//! let mut out = std::io::stdout();
//! let summary = collector.run(&mut out).await?;
//! cbr_rates::report::write_summary(&mut out, &summary, true)?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod report;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::aggregate::{CurrencyAggregate, Extremes, RateAggregator};
    pub use crate::config::RunConfig;
    pub use crate::data::{CbrDailySource, InMemoryRateSource, RateSource};
    pub use crate::engine::{RateCollector, RunSummary};
    pub use crate::error::{RatesError, Result};
    pub use crate::types::*;
}
