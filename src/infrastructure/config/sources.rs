//! External provider endpoints.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// `[sources]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_offerings_url")]
    pub offerings_url: String,
    #[serde(default = "default_news_url")]
    pub news_url: String,
    /// Base of the chart API; the symbol is appended as a path segment.
    #[serde(default = "default_quotes_url")]
    pub quotes_url: String,
    /// Exchange suffix appended to symbols (`.NS` for NSE).
    #[serde(default = "default_quote_suffix")]
    pub quote_suffix: String,
    /// Replaces the built-in fallback table when set.
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,
    /// News API key loaded from `NEWSAPI_KEY` env var at runtime.
    #[serde(skip)]
    pub news_api_key: Option<String>,
}

fn default_offerings_url() -> String {
    "https://api.ipoalerts.in/ipos?status=open".to_string()
}

fn default_news_url() -> String {
    "https://newsapi.org/v2/top-headlines".to_string()
}

fn default_quotes_url() -> String {
    "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
}

fn default_quote_suffix() -> String {
    ".NS".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            offerings_url: default_offerings_url(),
            news_url: default_news_url(),
            quotes_url: default_quotes_url(),
            quote_suffix: default_quote_suffix(),
            fallback_path: None,
            news_api_key: None,
        }
    }
}

impl SourcesConfig {
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the URL does not parse.
    pub fn offerings(&self) -> Result<Url, ConfigError> {
        parse_url("offerings_url", &self.offerings_url)
    }

    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the URL does not parse.
    pub fn news(&self) -> Result<Url, ConfigError> {
        parse_url("news_url", &self.news_url)
    }

    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if the URL does not parse.
    pub fn quotes(&self) -> Result<Url, ConfigError> {
        parse_url("quotes_url", &self.quotes_url)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.offerings()?;
        self.news()?;
        self.quotes()?;
        Ok(())
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: format!("{raw:?}: {e}"),
    })
}
