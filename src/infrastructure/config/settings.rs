//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for secrets like `TELEGRAM_BOT_TOKEN` and `NEWSAPI_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use ipowatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::dispatch::DispatchAppConfig;
use super::logging::LoggingConfig;
use super::sources::SourcesConfig;
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "ipowatch.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Broadcast schedule and fan-out limits.
    #[serde(default)]
    pub dispatch: DispatchAppConfig,

    /// Provider endpoints and fallback table location.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Telegram delivery configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

fn default_database_path() -> String {
    "ipowatch.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            dispatch: DispatchAppConfig::default(),
            sources: SourcesConfig::default(),
            telegram: TelegramAppConfig::default(),
        }
    }
}

fn secret_from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads secrets from the `TELEGRAM_BOT_TOKEN` and `NEWSAPI_KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., `notify_hour = 24`)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets come from the environment, never from the config file
        config.telegram.bot_token = secret_from_env("TELEGRAM_BOT_TOKEN");
        config.sources.news_api_key = secret_from_env("NEWSAPI_KEY");

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        self.dispatch.validate()?;
        self.sources.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Category;
    use crate::error::Error;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.database, "ipowatch.db");
        assert_eq!(config.dispatch.notify_hour, 9);
        assert_eq!(config.dispatch.max_batch_size, 3);
        assert_eq!(config.dispatch.utc_offset_minutes, 330);
        assert_eq!(config.dispatch.categories, vec![Category::Offerings]);
        assert_eq!(config.sources.quote_suffix, ".NS");
        assert!(!config.telegram.enabled);
    }

    #[test]
    fn dispatch_section_overrides() {
        let config = Config::parse_toml(
            r#"
            [dispatch]
            notify_hour = 18
            notify_minute = 30
            max_batch_size = 5
            categories = ["offerings", "headlines"]
            watchlist = ["TCS"]
            "#,
        )
        .unwrap();

        let dispatch = config.dispatch.to_dispatch_config();
        assert_eq!(dispatch.max_batch_size, 5);
        assert_eq!(dispatch.categories, vec![Category::Offerings, Category::Headlines]);
        assert_eq!(dispatch.params.symbols, vec!["TCS".to_string()]);
        assert!(config.dispatch.schedule().is_ok());
    }

    #[test]
    fn out_of_range_hour_is_rejected() {
        let err = Config::parse_toml("[dispatch]\nnotify_hour = 24\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "notify_hour", .. })
        ));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = Config::parse_toml("[dispatch]\nmax_batch_size = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "max_batch_size", .. })
        ));
    }

    #[test]
    fn bad_source_url_is_rejected() {
        let err = Config::parse_toml("[sources]\nnews_url = \"not a url\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "news_url", .. })
        ));
    }

    #[test]
    fn quotes_without_watchlist_is_rejected() {
        let err = Config::parse_toml("[dispatch]\ncategories = [\"offerings\", \"quotes\"]\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "watchlist", .. })
        ));

        let config =
            Config::parse_toml("[dispatch]\ncategories = [\"quotes\"]\nwatchlist = [\"TCS\"]\n").unwrap();
        assert_eq!(config.dispatch.categories, vec![Category::Quotes]);
    }

    #[test]
    fn blank_secret_is_treated_as_missing() {
        std::env::set_var("IPOWATCH_TEST_BLANK_SECRET", "  ");
        std::env::set_var("IPOWATCH_TEST_SET_SECRET", "test-token");

        assert_eq!(secret_from_env("IPOWATCH_TEST_BLANK_SECRET"), None);
        assert_eq!(secret_from_env("IPOWATCH_TEST_UNSET_SECRET"), None);
        assert_eq!(
            secret_from_env("IPOWATCH_TEST_SET_SECRET").as_deref(),
            Some("test-token")
        );

        std::env::remove_var("IPOWATCH_TEST_BLANK_SECRET");
        std::env::remove_var("IPOWATCH_TEST_SET_SECRET");
    }

    #[test]
    fn unknown_category_is_parse_error() {
        let err = Config::parse_toml("[dispatch]\ncategories = [\"crypto\"]\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
