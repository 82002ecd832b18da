//! Shared HTTP client for provider calls.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;

const USER_AGENT: &str = concat!("ipowatch/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a pooled `reqwest` client.
///
/// Cheap to clone; every provider adapter holds one.
#[derive(Clone)]
pub struct ProviderClient {
    http: HttpClient,
}

impl ProviderClient {
    /// Build a client whose requests are bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self { http }
    }

    /// GET `url` and decode a JSON body.
    ///
    /// Non-success statuses and undecodable bodies are reported as
    /// [`FetchError::Status`] and [`FetchError::Malformed`].
    pub async fn get_json<T>(&self, url: Url) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "Provider request");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}
