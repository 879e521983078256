//! Report run loop: dates -> fetch -> fold

use crate::aggregate::RateAggregator;
use crate::calendar::{self, format_feed_date};
use crate::config::RunConfig;
use crate::data::sources::RateSource;
use crate::error::Result;
use crate::report;
use chrono::NaiveDate;
use std::io::Write;

/// Outcome of one run over the lookback window
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Days in the window
    pub days_requested: usize,
    /// Days whose fetch returned a record list (possibly empty)
    pub days_succeeded: usize,
    pub aggregator: RateAggregator,
}

impl RunSummary {
    /// True when no record was collected over the whole window
    pub fn is_empty(&self) -> bool {
        self.aggregator.is_empty()
    }
}

/// Sequential collector over a rate source
pub struct RateCollector<S: RateSource> {
    source: S,
    config: RunConfig,
}

impl<S: RateSource> RateCollector<S> {
    /// Create a new collector
    pub fn new(source: S, config: RunConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the window ending today (local time)
    pub async fn run<W: Write>(&self, progress: &mut W) -> Result<RunSummary> {
        self.run_from(calendar::today(), progress).await
    }

    /// Run the window `[start, start-1, ...]`, writing the header and one
    /// progress line per day to `progress`.
    ///
    /// Days that fail to fetch or decode are skipped. Only a failing
    /// `progress` writer aborts the run.
    pub async fn run_from<W: Write>(
        &self,
        start: NaiveDate,
        progress: &mut W,
    ) -> Result<RunSummary> {
        let dates = calendar::lookback_dates(start, self.config.days);
        let mut summary = RunSummary {
            days_requested: dates.len(),
            ..RunSummary::default()
        };

        log::info!(
            "Fetching {} days from {} starting {}",
            dates.len(),
            self.source.name(),
            start
        );

        report::write_header(progress, self.config.days)?;

        for (i, date) in dates.iter().enumerate() {
            if i > 0 && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            report::write_progress(progress, i + 1, dates.len())?;

            match self.source.fetch_day(*date).await {
                Ok(records) => {
                    log::debug!("{}: {} records", format_feed_date(*date), records.len());
                    summary.days_succeeded += 1;
                    summary.aggregator.observe_all(&records);
                }
                Err(e) if e.skips_day() => {
                    log::warn!("Skipping {}: {}", format_feed_date(*date), e);
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Fetched {}/{} days, {} records, {} currencies",
            summary.days_succeeded,
            summary.days_requested,
            summary.aggregator.total_records(),
            summary.aggregator.currency_count()
        );

        Ok(summary)
    }
}
