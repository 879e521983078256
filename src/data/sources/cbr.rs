//! Central Bank of Russia daily rates source
//!
//! One GET per date against `/scripts/XML_daily_eng.asp?date_req=DD/MM/YYYY`.

use super::RateSource;
use crate::calendar::format_feed_date;
use crate::config::RunConfig;
use crate::data::feed;
use crate::error::{RatesError, Result};
use crate::types::RateRecord;
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const CBR_BASE_URL: &str = "http://www.cbr.ru";
const DAILY_PATH: &str = "/scripts/XML_daily_eng.asp";

/// CBR daily XML feed client
pub struct CbrDailySource {
    client: Client,
    base_url: String,
}

impl CbrDailySource {
    /// Create a client against `base_url` with an explicit request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cbr-rates/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                RatesError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build from a validated run configuration
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout)
    }

    /// Request URL for one date
    pub fn url_for(&self, date: NaiveDate) -> String {
        format!(
            "{}{}?date_req={}",
            self.base_url,
            DAILY_PATH,
            format_feed_date(date)
        )
    }
}

impl RateSource for CbrDailySource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RateRecord>> {
        let url = self.url_for(date);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                RatesError::NetworkError(format!("HTTP request to {} failed: {}", url, e))
            })?;

        if response.status() != StatusCode::OK {
            return Err(RatesError::HttpStatusError {
                status: response.status().as_u16(),
                date: format_feed_date(date),
            });
        }

        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(feed::charset_from_content_type);

        let body = response
            .bytes()
            .await
            .map_err(|e| RatesError::NetworkError(format!("Failed to read response: {}", e)))?;

        feed::parse_daily(&body, header_charset.as_deref(), date)
    }

    fn name(&self) -> &str {
        "cbr-daily"
    }
}
