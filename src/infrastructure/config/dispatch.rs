//! Broadcast schedule and fan-out configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::dispatch::DispatchConfig;
use crate::application::scheduler::DailySchedule;
use crate::domain::entity::Category;
use crate::error::ConfigError;
use crate::port::outbound::source::FetchParams;

/// `[dispatch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchAppConfig {
    /// Hour of the daily broadcast, local to `utc_offset_minutes`.
    #[serde(default = "default_notify_hour")]
    pub notify_hour: u32,
    #[serde(default)]
    pub notify_minute: u32,
    /// Maximum entities per digest.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Budget for one provider call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Budget for one delivery, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub send_timeout_secs: u64,
    /// Concurrent deliveries per cycle.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Offset of the schedule's wall clock from UTC (default: IST, +330).
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Categories included in the daily digest.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    /// Symbols quoted when `quotes` is a digest category.
    #[serde(default)]
    pub watchlist: Vec<String>,
}

const fn default_notify_hour() -> u32 {
    9
}

const fn default_max_batch_size() -> usize {
    3
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_concurrency() -> usize {
    8
}

const fn default_utc_offset_minutes() -> i32 {
    330
}

fn default_categories() -> Vec<Category> {
    vec![Category::Offerings]
}

impl Default for DispatchAppConfig {
    fn default() -> Self {
        Self {
            notify_hour: default_notify_hour(),
            notify_minute: 0,
            max_batch_size: default_max_batch_size(),
            fetch_timeout_secs: default_timeout_secs(),
            send_timeout_secs: default_timeout_secs(),
            concurrency: default_concurrency(),
            utc_offset_minutes: default_utc_offset_minutes(),
            categories: default_categories(),
            watchlist: Vec::new(),
        }
    }
}

impl DispatchAppConfig {
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for an impossible time or offset.
    pub fn schedule(&self) -> Result<DailySchedule, ConfigError> {
        DailySchedule::new(self.notify_hour, self.notify_minute, self.utc_offset_minutes)
    }

    #[must_use]
    pub fn to_dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            max_batch_size: self.max_batch_size,
            concurrency: self.concurrency,
            send_timeout: self.send_timeout(),
            categories: self.categories.clone(),
            params: FetchParams::symbols(self.watchlist.iter().cloned()),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.notify_hour >= 24 {
            return Err(ConfigError::InvalidValue {
                field: "notify_hour",
                reason: "must be less than 24".to_string(),
            });
        }
        if self.notify_minute >= 60 {
            return Err(ConfigError::InvalidValue {
                field: "notify_minute",
                reason: "must be less than 60".to_string(),
            });
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_batch_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.send_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "send_timeout_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(ConfigError::InvalidValue {
                field: "utc_offset_minutes",
                reason: "must be within ±14 hours".to_string(),
            });
        }
        if self.categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "categories",
                reason: "at least one category is required".to_string(),
            });
        }
        if self.categories.contains(&Category::Quotes) && self.watchlist.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "watchlist",
                reason: "quotes in categories needs at least one symbol".to_string(),
            });
        }
        Ok(())
    }
}
