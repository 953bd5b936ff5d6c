//! Workload engine configuration.

use std::path::Path;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use transload_core::{Rates, DEFAULT_LINES_PER_HOUR, DEFAULT_WORDS_PER_HOUR};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed config file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the workload estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Working hours in one working day
    pub hours_per_day: u32,
    /// Length of the short-term horizon in calendar days
    pub horizon_days: u32,
    /// Words per hour for translators without a usable rate
    pub default_words_per_hour: u32,
    /// Lines per hour for translators without a usable rate
    pub default_lines_per_hour: u32,
    /// Offset of the agency's local time from UTC, in minutes
    pub utc_offset_minutes: i32,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            hours_per_day: 8,
            horizon_days: 7,
            default_words_per_hour: DEFAULT_WORDS_PER_HOUR,
            default_lines_per_hour: DEFAULT_LINES_PER_HOUR,
            utc_offset_minutes: 0,
        }
    }
}

impl WorkloadConfig {
    /// Load configuration from a JSON file. A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(json) => serde_json::from_str::<Self>(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hours_per_day == 0 || self.hours_per_day > 24 {
            return Err(ConfigError::Invalid(format!(
                "hours_per_day must be between 1 and 24, got {}",
                self.hours_per_day
            )));
        }
        if self.default_words_per_hour == 0 || self.default_lines_per_hour == 0 {
            return Err(ConfigError::Invalid("default rates must be positive".to_string()));
        }
        if FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    /// Rates used when a translator has none of their own.
    pub fn default_rates(&self) -> Rates {
        Rates {
            words_per_hour: self.default_words_per_hour.max(1),
            lines_per_hour: self.default_lines_per_hour.max(1),
        }
    }

    /// The agency's local offset. Out-of-range values fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }
}
