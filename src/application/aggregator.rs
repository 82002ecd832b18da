//! Aggregation of data sources into one entity set.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info};

use crate::domain::batch::EntitySet;
use crate::domain::entity::{Category, Entity};
use crate::port::outbound::source::{DataSource, FetchParams};

/// Calls each selected source once and concatenates results in
/// registration order.
///
/// Never fails: a source that fell back contributes its fallback entities
/// and is recorded in [`EntitySet::degraded`].
pub struct Aggregator {
    sources: Vec<Arc<dyn DataSource>>,
    max_batch_size: usize,
}

impl Aggregator {
    #[must_use]
    pub fn new(max_batch_size: usize) -> Self {
        Self {
            sources: Vec::new(),
            max_batch_size,
        }
    }

    /// Register a source. Order of registration is output order.
    pub fn register(&mut self, source: Arc<dyn DataSource>) {
        self.sources.push(source);
    }

    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.register(source);
        self
    }

    #[must_use]
    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Categories with at least one registered source.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.sources.iter().map(|s| s.category()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Fetch every source serving one of `categories`, untruncated.
    pub async fn collect(&self, categories: &[Category], params: &FetchParams) -> EntitySet {
        let selected: Vec<&Arc<dyn DataSource>> = self
            .sources
            .iter()
            .filter(|s| categories.contains(&s.category()))
            .collect();

        let outcomes = join_all(selected.iter().map(|s| s.fetch(params))).await;

        let mut entities: Vec<Entity> = Vec::new();
        let mut degraded = Vec::new();
        for (source, outcome) in selected.iter().zip(outcomes) {
            if outcome.is_fallback() {
                degraded.push(source.category());
            }
            debug!(
                category = %source.category(),
                count = outcome.entities.len(),
                fallback = outcome.is_fallback(),
                "Source fetched"
            );
            entities.extend(outcome.entities);
        }

        info!(
            sources = selected.len(),
            entities = entities.len(),
            degraded = degraded.len(),
            "Aggregation complete"
        );
        EntitySet::new(entities, degraded)
    }

    /// Fetch and truncate to `max_batch_size` after concatenation.
    pub async fn aggregate(&self, categories: &[Category], params: &FetchParams) -> EntitySet {
        self.collect(categories, params)
            .await
            .truncated(self.max_batch_size)
    }
}
