//! Preference store port.

use async_trait::async_trait;

use crate::domain::id::RecipientId;
use crate::domain::subscriber::{FilterUpdate, NotifyTime, Subscriber};
use crate::error::StoreError;

/// Durable mapping from recipient to preferences and subscription state.
///
/// Exactly one record exists per [`RecipientId`]. All mutations are partial:
/// a field not named by the call is never rewritten.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Create a default record if absent; no-op otherwise.
    ///
    /// Safe under concurrent calls for the same id.
    async fn ensure(&self, recipient: RecipientId) -> Result<(), StoreError>;

    /// Update only the subscription flag.
    async fn set_subscribed(&self, recipient: RecipientId, subscribed: bool) -> Result<(), StoreError>;

    /// Update only the filter fields named by `update`.
    async fn set_filters(&self, recipient: RecipientId, update: FilterUpdate) -> Result<(), StoreError>;

    /// Update only the preferred notify time.
    async fn set_notify_time(&self, recipient: RecipientId, time: NotifyTime) -> Result<(), StoreError>;

    /// Load one record.
    async fn get(&self, recipient: RecipientId) -> Result<Option<Subscriber>, StoreError>;

    /// Snapshot of all subscribed records, ordered by recipient id.
    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, StoreError>;
}
