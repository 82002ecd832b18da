//! Failing [`PreferenceStore`] for error-path tests.

use async_trait::async_trait;

use crate::domain::id::RecipientId;
use crate::domain::subscriber::{FilterUpdate, NotifyTime, Subscriber};
use crate::error::StoreError;
use crate::port::outbound::store::PreferenceStore;

/// A store whose every operation fails with a connection error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl FailingStore {
    pub fn new() -> Self {
        Self
    }

    fn offline<T>() -> Result<T, StoreError> {
        Err(StoreError::Connection("store offline".into()))
    }
}

#[async_trait]
impl PreferenceStore for FailingStore {
    async fn ensure(&self, _recipient: RecipientId) -> Result<(), StoreError> {
        Self::offline()
    }

    async fn set_subscribed(&self, _recipient: RecipientId, _subscribed: bool) -> Result<(), StoreError> {
        Self::offline()
    }

    async fn set_filters(&self, _recipient: RecipientId, _update: FilterUpdate) -> Result<(), StoreError> {
        Self::offline()
    }

    async fn set_notify_time(&self, _recipient: RecipientId, _time: NotifyTime) -> Result<(), StoreError> {
        Self::offline()
    }

    async fn get(&self, _recipient: RecipientId) -> Result<Option<Subscriber>, StoreError> {
        Self::offline()
    }

    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, StoreError> {
        Self::offline()
    }
}
