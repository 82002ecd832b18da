//! In-memory preference store.
//!
//! Same contract as the SQLite store without durability. Used by tests and
//! by `--memory` runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::id::RecipientId;
use crate::domain::subscriber::{FilterUpdate, NotifyTime, Subscriber};
use crate::error::StoreError;
use crate::port::outbound::store::PreferenceStore;

/// Preference store backed by a locked ordered map.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    records: RwLock<BTreeMap<RecipientId, Subscriber>>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn update(
        &self,
        recipient: RecipientId,
        apply: impl FnOnce(&mut Subscriber),
    ) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records
            .get_mut(&recipient)
            .ok_or(StoreError::RecipientNotFound(recipient))?;
        apply(record);
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn ensure(&self, recipient: RecipientId) -> Result<(), StoreError> {
        self.records
            .write()
            .entry(recipient)
            .or_insert_with(|| Subscriber::new(recipient));
        Ok(())
    }

    async fn set_subscribed(&self, recipient: RecipientId, subscribed: bool) -> Result<(), StoreError> {
        self.update(recipient, |r| r.subscribed = subscribed)
    }

    async fn set_filters(&self, recipient: RecipientId, update: FilterUpdate) -> Result<(), StoreError> {
        self.update(recipient, |r| update.apply_to(&mut r.preferences))
    }

    async fn set_notify_time(&self, recipient: RecipientId, time: NotifyTime) -> Result<(), StoreError> {
        self.update(recipient, |r| r.notify_time = time)
    }

    async fn get(&self, recipient: RecipientId) -> Result<Option<Subscriber>, StoreError> {
        Ok(self.records.read().get(&recipient).cloned())
    }

    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, StoreError> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|r| r.subscribed)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn concurrent_ensure_yields_one_record() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.ensure(RecipientId::new(42)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_subscribed_is_a_snapshot() {
        let store = MemoryPreferenceStore::new();
        store.ensure(RecipientId::new(1)).await.unwrap();
        store.set_subscribed(RecipientId::new(1), true).await.unwrap();

        let snapshot = store.list_subscribed().await.unwrap();
        store.ensure(RecipientId::new(2)).await.unwrap();
        store.set_subscribed(RecipientId::new(2), true).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list_subscribed().await.unwrap().len(), 2);
    }
}
