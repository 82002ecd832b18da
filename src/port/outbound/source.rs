//! Data source ports.
//!
//! A [`LiveSource`] talks to one external provider and may fail. A
//! [`DataSource`] never fails: it always yields a well-formed sequence,
//! substituting fallback entities when the live call does not succeed.

use async_trait::async_trait;

use crate::domain::entity::{Category, Entity, Provenance};
use crate::error::FetchError;

/// Per-call parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    /// Instrument symbols for quote lookups; ignored by other categories.
    pub symbols: Vec<String>,
}

impl FetchParams {
    #[must_use]
    pub fn symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }
}

/// Entities returned by a [`DataSource`] together with their origin.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub entities: Vec<Entity>,
    pub source: Provenance,
}

impl FetchOutcome {
    #[must_use]
    pub fn live(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            source: Provenance::Live,
        }
    }

    #[must_use]
    pub fn fallback(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            source: Provenance::Fallback,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == Provenance::Fallback
    }
}

/// Provider client for one category. Errors are expected.
#[async_trait]
pub trait LiveSource: Send + Sync {
    /// Category this provider serves.
    fn category(&self) -> Category;

    /// Fetch and normalize entities from the provider.
    async fn fetch_live(&self, params: &FetchParams) -> Result<Vec<Entity>, FetchError>;
}

/// Failure-free fetch contract consumed by the aggregator.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Category this source serves.
    fn category(&self) -> Category;

    /// Fetch entities; never propagates an error.
    async fn fetch(&self, params: &FetchParams) -> FetchOutcome;
}
