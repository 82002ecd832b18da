//! Data source adapters.
//!
//! HTTP provider clients implement [`LiveSource`]; [`ResilientSource`] wraps
//! one with a time budget and the static fallback table so the aggregator
//! only ever sees a well-formed [`FetchOutcome`].

mod dto;
mod headlines;
mod http;
mod offerings;
mod quotes;

pub use headlines::HeadlineSource;
pub use http::ProviderClient;
pub use offerings::OfferingSource;
pub use quotes::QuoteSource;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::entity::{Category, Entity, Provenance};
use crate::domain::fallback::FallbackTable;
use crate::error::FetchError;
use crate::port::outbound::source::{DataSource, FetchOutcome, FetchParams, LiveSource};

/// Fault-tolerant wrapper around a [`LiveSource`].
///
/// Timeouts, transport errors, non-success statuses, malformed payloads and
/// empty results all resolve to the category's fallback entities.
pub struct ResilientSource<S> {
    live: S,
    fallback: Arc<FallbackTable>,
    timeout: Duration,
}

impl<S: LiveSource> ResilientSource<S> {
    #[must_use]
    pub fn new(live: S, fallback: Arc<FallbackTable>, timeout: Duration) -> Self {
        Self {
            live,
            fallback,
            timeout,
        }
    }

    async fn try_live(&self, params: &FetchParams) -> Result<Vec<Entity>, FetchError> {
        let entities = tokio::time::timeout(self.timeout, self.live.fetch_live(params))
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))??;
        if entities.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(entities)
    }
}

#[async_trait]
impl<S: LiveSource> DataSource for ResilientSource<S> {
    fn category(&self) -> Category {
        self.live.category()
    }

    async fn fetch(&self, params: &FetchParams) -> FetchOutcome {
        let category = self.live.category();
        match self.try_live(params).await {
            Ok(entities) => {
                debug!(category = %category, count = entities.len(), "Live fetch succeeded");
                let entities = entities
                    .into_iter()
                    .map(|e| e.with_provenance(Provenance::Live))
                    .collect();
                FetchOutcome::live(entities)
            }
            Err(err) => {
                let entities = self.fallback.resolve(category, &params.symbols);
                warn!(
                    category = %category,
                    error = %err,
                    fallback_count = entities.len(),
                    "Degraded fetch, using fallback"
                );
                FetchOutcome::fallback(entities)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::HeadlineDetail;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Ok(Vec<Entity>),
        Empty,
        Malformed,
        Status,
        Hang,
    }

    struct ScriptedLive {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl ScriptedLive {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LiveSource for ScriptedLive {
        fn category(&self) -> Category {
            Category::Headlines
        }

        async fn fetch_live(&self, _params: &FetchParams) -> Result<Vec<Entity>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Ok(entities) => Ok(entities.clone()),
                Behaviour::Empty => Ok(vec![]),
                Behaviour::Malformed => Err(FetchError::Malformed("missing articles".into())),
                Behaviour::Status => Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY)),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(vec![])
                }
            }
        }
    }

    fn table() -> Arc<FallbackTable> {
        let mut table = FallbackTable::new();
        table.insert(
            Category::Headlines,
            vec![
                Entity::headline("Market is stable today.", HeadlineDetail::default()),
                Entity::headline("Investors eye upcoming IPOs.", HeadlineDetail::default()),
            ],
        );
        Arc::new(table)
    }

    fn source(behaviour: Behaviour) -> ResilientSource<ScriptedLive> {
        ResilientSource::new(ScriptedLive::new(behaviour), table(), Duration::from_millis(50))
    }

    fn assert_fallback(outcome: &FetchOutcome) {
        assert!(outcome.is_fallback());
        assert_eq!(outcome.entities.len(), 2);
        assert!(outcome.entities.iter().all(Entity::is_fallback));
    }

    #[tokio::test]
    async fn live_result_is_tagged_live() {
        let live = vec![Entity::headline("Rupee gains", HeadlineDetail::default())];
        let outcome = source(Behaviour::Ok(live)).fetch(&FetchParams::default()).await;

        assert!(!outcome.is_fallback());
        assert_eq!(outcome.entities[0].name, "Rupee gains");
        assert!(!outcome.entities[0].is_fallback());
    }

    #[tokio::test]
    async fn malformed_payload_falls_back() {
        assert_fallback(&source(Behaviour::Malformed).fetch(&FetchParams::default()).await);
    }

    #[tokio::test]
    async fn error_status_falls_back() {
        assert_fallback(&source(Behaviour::Status).fetch(&FetchParams::default()).await);
    }

    #[tokio::test]
    async fn empty_result_falls_back() {
        assert_fallback(&source(Behaviour::Empty).fetch(&FetchParams::default()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_falls_back() {
        let source = source(Behaviour::Hang);
        let outcome = source.fetch(&FetchParams::default()).await;

        assert_fallback(&outcome);
        assert_eq!(source.live.calls.load(Ordering::SeqCst), 1);
    }
}
