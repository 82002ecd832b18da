//! Exchange quote provider.

use async_trait::async_trait;
use url::Url;

use super::dto::ChartResponse;
use super::http::ProviderClient;
use crate::domain::entity::{Category, Entity};
use crate::error::FetchError;
use crate::port::outbound::source::{FetchParams, LiveSource};

/// Client for the Yahoo chart endpoint. Symbols are looked up on the
/// exchange named by `suffix` (`.NS` for NSE).
pub struct QuoteSource {
    client: ProviderClient,
    base_url: Url,
    suffix: String,
}

impl QuoteSource {
    #[must_use]
    pub fn new(client: ProviderClient, base_url: Url, suffix: impl Into<String>) -> Self {
        Self {
            client,
            base_url,
            suffix: suffix.into(),
        }
    }

    fn symbol_url(&self, symbol: &str) -> Result<Url, FetchError> {
        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '&' || c == '-') {
            return Err(FetchError::InvalidRequest(format!("invalid symbol `{symbol}`")));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidRequest("quote base url cannot be a base".into()))?
            .pop_if_empty()
            .push(&format!("{}{}", symbol.to_ascii_uppercase(), self.suffix));
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1d");
        Ok(url)
    }
}

#[async_trait]
impl LiveSource for QuoteSource {
    fn category(&self) -> Category {
        Category::Quotes
    }

    /// One request per symbol; any failing symbol fails the whole call.
    async fn fetch_live(&self, params: &FetchParams) -> Result<Vec<Entity>, FetchError> {
        let mut quotes = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            let response: ChartResponse = self.client.get_json(self.symbol_url(symbol)?).await?;
            quotes.push(response.into_entity(symbol)?);
        }
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> QuoteSource {
        QuoteSource::new(
            ProviderClient::default(),
            Url::parse("https://query1.finance.yahoo.com/v8/finance/chart/").unwrap(),
            ".NS",
        )
    }

    #[test]
    fn symbol_url_appends_exchange_suffix() {
        let url = source().symbol_url("reliance").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/RELIANCE.NS?range=1d&interval=1d"
        );
    }

    #[test]
    fn symbol_url_rejects_path_tricks() {
        assert!(source().symbol_url("../admin").is_err());
        assert!(source().symbol_url("").is_err());
    }
}
