//! Canned [`DataSource`] implementations.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::entity::{Category, Entity, Provenance};
use crate::port::outbound::source::{DataSource, FetchOutcome, FetchParams};

/// A source returning fixed data, or alternating between two data sets on
/// successive calls.
pub struct StaticSource {
    category: Category,
    rounds: Vec<Vec<Entity>>,
    provenance: Provenance,
    calls: AtomicUsize,
}

impl StaticSource {
    /// Always returns `entities` as live data.
    pub fn live(category: Category, entities: Vec<Entity>) -> Self {
        Self::build(category, vec![entities], Provenance::Live)
    }

    /// Always reports a fallback with `entities`.
    pub fn fallback(category: Category, entities: Vec<Entity>) -> Self {
        let tagged = entities
            .into_iter()
            .map(|e| e.with_provenance(Provenance::Fallback))
            .collect();
        Self::build(category, vec![tagged], Provenance::Fallback)
    }

    /// Returns `first` on odd calls and `second` on even calls.
    pub fn alternating(category: Category, first: Vec<Entity>, second: Vec<Entity>) -> Self {
        Self::build(category, vec![first, second], Provenance::Live)
    }

    fn build(category: Category, rounds: Vec<Vec<Entity>>, provenance: Provenance) -> Self {
        Self {
            category,
            rounds,
            provenance,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for StaticSource {
    fn category(&self) -> Category {
        self.category
    }

    async fn fetch(&self, _params: &FetchParams) -> FetchOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let entities = self.rounds[call % self.rounds.len()].clone();
        match self.provenance {
            Provenance::Live => FetchOutcome::live(entities),
            Provenance::Fallback => FetchOutcome::fallback(entities),
        }
    }
}
