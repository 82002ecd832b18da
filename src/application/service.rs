//! Operations exposed to the interaction layer.
//!
//! Every store mutation first ensures the record exists, so a user can issue
//! any command before `/start`.

use std::sync::Arc;

use tracing::info;

use super::aggregator::Aggregator;
use crate::domain::batch::EntitySet;
use crate::domain::entity::{Category, Entity};
use crate::domain::error::DomainError;
use crate::domain::id::RecipientId;
use crate::domain::sip::{self, SipProjection};
use crate::domain::subscriber::{FilterUpdate, NotifyTime, Subscriber};
use crate::error::StoreError;
use crate::port::outbound::source::FetchParams;
use crate::port::outbound::store::PreferenceStore;

/// Headlines shown on demand.
const HEADLINE_LIMIT: usize = 5;

/// Facade over the store and aggregator for user-initiated requests.
#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn PreferenceStore>,
    aggregator: Arc<Aggregator>,
}

impl AlertService {
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>, aggregator: Arc<Aggregator>) -> Self {
        Self { store, aggregator }
    }

    /// Idempotent first contact.
    pub async fn register(&self, recipient: RecipientId) -> Result<(), StoreError> {
        self.store.ensure(recipient).await
    }

    pub async fn subscribe(&self, recipient: RecipientId) -> Result<(), StoreError> {
        self.store.ensure(recipient).await?;
        self.store.set_subscribed(recipient, true).await?;
        info!(recipient_id = %recipient, "Subscribed");
        Ok(())
    }

    pub async fn unsubscribe(&self, recipient: RecipientId) -> Result<(), StoreError> {
        self.store.ensure(recipient).await?;
        self.store.set_subscribed(recipient, false).await?;
        info!(recipient_id = %recipient, "Unsubscribed");
        Ok(())
    }

    pub async fn update_filters(
        &self,
        recipient: RecipientId,
        update: FilterUpdate,
    ) -> Result<Subscriber, StoreError> {
        self.store.ensure(recipient).await?;
        self.store.set_filters(recipient, update).await?;
        self.settings(recipient).await
    }

    pub async fn set_notify_time(
        &self,
        recipient: RecipientId,
        time: NotifyTime,
    ) -> Result<(), StoreError> {
        self.store.ensure(recipient).await?;
        self.store.set_notify_time(recipient, time).await
    }

    /// Current record, creating the default one if needed.
    pub async fn settings(&self, recipient: RecipientId) -> Result<Subscriber, StoreError> {
        self.store.ensure(recipient).await?;
        self.store
            .get(recipient)
            .await?
            .ok_or(StoreError::RecipientNotFound(recipient))
    }

    /// Open offerings, truncated to the configured batch size.
    pub async fn upcoming_offerings(&self) -> EntitySet {
        self.aggregator
            .aggregate(&[Category::Offerings], &FetchParams::default())
            .await
    }

    pub async fn headlines(&self) -> EntitySet {
        self.aggregator
            .collect(&[Category::Headlines], &FetchParams::default())
            .await
            .truncated(HEADLINE_LIMIT)
    }

    /// Quote for one symbol; a placeholder when live data is unavailable.
    pub async fn quote(&self, symbol: &str) -> Option<Entity> {
        let set = self
            .aggregator
            .collect(&[Category::Quotes], &FetchParams::symbols([symbol]))
            .await;
        set.entities().first().cloned()
    }

    /// # Errors
    /// Returns [`DomainError::NonPositiveSipInput`] for zero or negative input
    /// and [`DomainError::SipOutOfRange`] when the projection does not fit.
    pub fn sip(&self, monthly_amount: u64, years: u32, annual_rate: f64) -> Result<SipProjection, DomainError> {
        sip::project(monthly_amount, years, annual_rate)
    }
}
