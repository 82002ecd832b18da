//! Static fallback entities per category.

use std::collections::HashMap;

use super::entity::{Category, Entity, Provenance, QuoteDetail};

/// Category → representative entities used when live retrieval fails.
///
/// Every entity stored here is tagged [`Provenance::Fallback`].
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    entries: HashMap<Category, Vec<Entity>>,
}

impl FallbackTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entries for a category.
    pub fn insert(&mut self, category: Category, entities: Vec<Entity>) {
        let tagged = entities
            .into_iter()
            .map(|e| e.with_provenance(Provenance::Fallback))
            .collect();
        self.entries.insert(category, tagged);
    }

    /// Entries for a category, empty if none were configured.
    #[must_use]
    pub fn get(&self, category: Category) -> &[Entity] {
        self.entries.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Fallback set for a fetch.
    ///
    /// Quote lookups name their symbols: each gets its configured row, or a
    /// placeholder with no figures when the table has none for it.
    #[must_use]
    pub fn resolve(&self, category: Category, symbols: &[String]) -> Vec<Entity> {
        let configured = self.get(category);
        if category != Category::Quotes || symbols.is_empty() {
            return configured.to_vec();
        }
        symbols
            .iter()
            .map(|s| s.to_ascii_uppercase())
            .map(|symbol| {
                configured
                    .iter()
                    .find(|e| e.name == symbol)
                    .cloned()
                    .unwrap_or_else(|| {
                        Entity::quote(symbol, QuoteDetail::default())
                            .with_provenance(Provenance::Fallback)
                    })
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
