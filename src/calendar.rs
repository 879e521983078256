//! Lookback calendar for feed requests

use chrono::{Local, NaiveDate};
use std::iter;

/// Date format the feed expects in `date_req`
pub const FEED_DATE_FORMAT: &str = "%d/%m/%Y";

/// Current wall-clock date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get `days` dates stepping backward from `start`: `[start, start-1, ...]`
///
/// Stops early only if the calendar runs out (chrono's minimum date).
pub fn lookback_dates(start: NaiveDate, days: usize) -> Vec<NaiveDate> {
    iter::successors(Some(start), |date| date.pred_opt())
        .take(days)
        .collect()
}

/// Render a date the way the feed endpoint wants it (DD/MM/YYYY)
pub fn format_feed_date(date: NaiveDate) -> String {
    date.format(FEED_DATE_FORMAT).to_string()
}
