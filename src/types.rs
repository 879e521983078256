//! Core types and constants

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Short currency identifier as published by the feed (e.g. "USD")
pub type CurrencyCode = String;

/// Rate in roubles per one unit of foreign currency
pub type Rate = f64;

/// One normalized feed entry for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub date: NaiveDate,
    pub code: CurrencyCode,
    pub name: String,
    /// Always > 0
    pub per_unit_value: Rate,
}

impl RateRecord {
    /// Create a new record
    pub fn new(
        date: NaiveDate,
        code: impl Into<CurrencyCode>,
        name: impl Into<String>,
        per_unit_value: Rate,
    ) -> Self {
        Self {
            date,
            code: code.into(),
            name: name.into(),
            per_unit_value,
        }
    }
}
