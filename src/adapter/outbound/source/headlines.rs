//! Business headlines provider.

use async_trait::async_trait;
use url::Url;

use super::dto::{Article, HeadlinesResponse};
use super::http::ProviderClient;
use crate::domain::entity::{Category, Entity};
use crate::error::FetchError;
use crate::port::outbound::source::{FetchParams, LiveSource};

const MAX_HEADLINES: usize = 5;

/// Client for NewsAPI `top-headlines`.
pub struct HeadlineSource {
    client: ProviderClient,
    url: Url,
    api_key: Option<String>,
}

impl HeadlineSource {
    #[must_use]
    pub fn new(client: ProviderClient, url: Url, api_key: Option<String>) -> Self {
        Self {
            client,
            url,
            api_key,
        }
    }

    fn request_url(&self) -> Result<Url, FetchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::InvalidRequest("NEWSAPI_KEY is not set".into()))?;
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("country", "in")
            .append_pair("category", "business")
            .append_pair("apiKey", key);
        Ok(url)
    }
}

#[async_trait]
impl LiveSource for HeadlineSource {
    fn category(&self) -> Category {
        Category::Headlines
    }

    async fn fetch_live(&self, _params: &FetchParams) -> Result<Vec<Entity>, FetchError> {
        let response: HeadlinesResponse = self.client.get_json(self.request_url()?).await?;
        Ok(response
            .articles
            .into_iter()
            .filter_map(Article::into_entity)
            .take(MAX_HEADLINES)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_invalid_request() {
        let source = HeadlineSource::new(
            ProviderClient::default(),
            Url::parse("https://newsapi.org/v2/top-headlines").unwrap(),
            None,
        );
        assert!(matches!(source.request_url(), Err(FetchError::InvalidRequest(_))));
    }

    #[test]
    fn request_url_carries_query() {
        let source = HeadlineSource::new(
            ProviderClient::default(),
            Url::parse("https://newsapi.org/v2/top-headlines").unwrap(),
            Some("k".into()),
        );
        let url = source.request_url().unwrap();
        assert_eq!(url.query(), Some("country=in&category=business&apiKey=k"));
    }
}
