//! Fetched entity sets and per-recipient dispatch batches.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::entity::{Category, Entity};
use super::filter;
use super::id::RecipientId;
use super::subscriber::Preferences;

/// Result of one aggregation: ordered, immutable, cheap to share.
///
/// Every recipient of a dispatch cycle reads the same `EntitySet`.
#[derive(Debug, Clone)]
pub struct EntitySet {
    entities: Arc<[Entity]>,
    degraded: Vec<Category>,
    fetched_at: DateTime<Utc>,
}

impl EntitySet {
    #[must_use]
    pub fn new(entities: Vec<Entity>, degraded: Vec<Category>) -> Self {
        Self {
            entities: entities.into(),
            degraded,
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Categories whose source fell back to static data.
    #[must_use]
    pub fn degraded(&self) -> &[Category] {
        &self.degraded
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    #[must_use]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Keep the first `max` entities, preserving order.
    #[must_use]
    pub fn truncated(&self, max: usize) -> Self {
        if self.entities.len() <= max {
            return self.clone();
        }
        Self {
            entities: self.entities[..max].to_vec().into(),
            degraded: self.degraded.clone(),
            fetched_at: self.fetched_at,
        }
    }

    /// Build one recipient's batch: filtered, then truncated to `max`.
    #[must_use]
    pub fn personalize(&self, recipient: RecipientId, prefs: &Preferences, max: usize) -> DispatchBatch {
        let entities: Vec<Entity> = filter::select(&self.entities, prefs, max)
            .into_iter()
            .cloned()
            .collect();
        DispatchBatch {
            recipient,
            entities,
        }
    }
}

/// Entities selected for one recipient in one cycle. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchBatch {
    pub recipient: RecipientId,
    pub entities: Vec<Entity>,
}

impl DispatchBatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True when any selected entity came from the fallback table.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.entities.iter().any(Entity::is_fallback)
    }
}
