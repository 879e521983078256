//! Run configuration

use crate::data::sources::cbr::CBR_BASE_URL;
use crate::error::{RatesError, Result};
use std::time::Duration;

/// Default lookback window in days
pub const REPORT_DAYS: usize = 90;
/// Default pause between consecutive feed requests
pub const API_CALL_DELAY: Duration = Duration::from_millis(100);
/// Default per-request HTTP timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one report run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of days to look back, today included
    pub days: usize,
    /// Fixed pause between fetch attempts
    pub request_delay: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Feed host, scheme included
    pub base_url: String,
    /// Sort the average-rate table by currency code
    pub sort_by_code: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            days: REPORT_DAYS,
            request_delay: API_CALL_DELAY,
            timeout: REQUEST_TIMEOUT,
            base_url: CBR_BASE_URL.to_string(),
            sort_by_code: true,
        }
    }
}

impl RunConfig {
    /// Check settings before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(RatesError::ConfigError(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        let url = self.base_url.trim();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .ok_or_else(|| {
                RatesError::ConfigError(format!(
                    "Base URL must start with http:// or https://: {:?}",
                    self.base_url
                ))
            })?;

        if host.trim_matches('/').is_empty() {
            return Err(RatesError::ConfigError(format!(
                "Base URL has no host: {:?}",
                self.base_url
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.days, 90);
        assert_eq!(config.request_delay, Duration::from_millis(100));
        assert_eq!(config.base_url, "http://www.cbr.ru");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_days_is_valid() {
        let config = RunConfig {
            days: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        for url in ["www.cbr.ru", "ftp://cbr.ru", "http://", "https:///", ""] {
            let config = RunConfig {
                base_url: url.to_string(),
                ..RunConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, RatesError::ConfigError(_)), "accepted {:?}", url);
        }
    }

    #[test]
    fn test_zero_timeout() {
        let config = RunConfig {
            timeout: Duration::ZERO,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
