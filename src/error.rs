use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::RecipientId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Preference store failures.
///
/// These always propagate: losing a subscription write is a correctness
/// issue, unlike a degraded data fetch.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store query failed: {0}")]
    Query(String),

    #[error("recipient {0} is not registered")]
    RecipientNotFound(RecipientId),

    #[error("corrupt {field} for recipient {recipient}: {value:?}")]
    Corrupt {
        recipient: RecipientId,
        field: &'static str,
        value: String,
    },
}

/// Reasons a live provider call could not produce entities.
///
/// Never surfaced past a data source; converted to the fallback set.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("provider returned no entries")]
    Empty,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure to deliver a rendered batch to one recipient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("recipient blocked the bot or is unreachable")]
    Unreachable,

    #[error("rate limited by transport")]
    RateLimited,

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("delivery task aborted: {0}")]
    Aborted(String),

    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
