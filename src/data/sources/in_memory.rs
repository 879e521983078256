//! In-memory rate source with canned per-day responses

use super::RateSource;
use crate::calendar::format_feed_date;
use crate::data::feed;
use crate::error::{RatesError, Result};
use crate::types::RateRecord;
use chrono::NaiveDate;
use hashbrown::HashMap;

/// What the source answers for one date
#[derive(Debug, Clone)]
pub enum InMemoryDay {
    /// Already-normalized records
    Records(Vec<RateRecord>),
    /// A raw feed body, decoded the same way as a live response
    Body(Vec<u8>),
    /// A non-success HTTP status
    Status(u16),
}

/// Rate source backed by a map of dates; unknown dates fail like a
/// refused connection
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateSource {
    days: HashMap<NaiveDate, InMemoryDay>,
}

impl InMemoryRateSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `date` with `records`
    pub fn add_records(&mut self, date: NaiveDate, records: Vec<RateRecord>) {
        self.days.insert(date, InMemoryDay::Records(records));
    }

    /// Answer `date` with a raw feed body
    pub fn add_body(&mut self, date: NaiveDate, body: impl Into<Vec<u8>>) {
        self.days.insert(date, InMemoryDay::Body(body.into()));
    }

    /// Answer `date` with an HTTP status error
    pub fn add_status(&mut self, date: NaiveDate, status: u16) {
        self.days.insert(date, InMemoryDay::Status(status));
    }

    /// Number of configured days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl RateSource for InMemoryRateSource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RateRecord>> {
        match self.days.get(&date) {
            Some(InMemoryDay::Records(records)) => Ok(records.clone()),
            Some(InMemoryDay::Body(body)) => feed::parse_daily(body, None, date),
            Some(InMemoryDay::Status(status)) => Err(RatesError::HttpStatusError {
                status: *status,
                date: format_feed_date(date),
            }),
            None => Err(RatesError::NetworkError(format!(
                "No data configured for {}",
                format_feed_date(date)
            ))),
        }
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}
