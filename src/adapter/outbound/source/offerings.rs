//! Open IPO listings provider.

use async_trait::async_trait;
use url::Url;

use super::dto::IpoListResponse;
use super::http::ProviderClient;
use crate::domain::entity::{Category, Entity};
use crate::error::FetchError;
use crate::port::outbound::source::{FetchParams, LiveSource};

/// Client for the ipoalerts listings endpoint.
pub struct OfferingSource {
    client: ProviderClient,
    url: Url,
}

impl OfferingSource {
    #[must_use]
    pub fn new(client: ProviderClient, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl LiveSource for OfferingSource {
    fn category(&self) -> Category {
        Category::Offerings
    }

    async fn fetch_live(&self, _params: &FetchParams) -> Result<Vec<Entity>, FetchError> {
        let response: IpoListResponse = self.client.get_json(self.url.clone()).await?;
        Ok(response.data.into_iter().map(|item| item.into_entity()).collect())
    }
}
