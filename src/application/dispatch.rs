//! The scheduled broadcast cycle.
//!
//! One cycle loads subscribers, fetches the shared entity pool once, then
//! fans out one delivery task per recipient. Delivery failures stay with
//! their recipient; only a store-wide failure aborts the cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::aggregator::Aggregator;
use super::render;
use crate::domain::entity::Category;
use crate::domain::id::RecipientId;
use crate::error::{DeliveryError, StoreError};
use crate::port::outbound::source::FetchParams;
use crate::port::outbound::store::PreferenceStore;
use crate::port::outbound::transport::Transport;

/// Static knobs of a dispatch cycle.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum entities in one recipient's digest.
    pub max_batch_size: usize,
    /// Maximum concurrent deliveries.
    pub concurrency: usize,
    /// Bound on a single `send`.
    pub send_timeout: Duration,
    /// Categories fetched for the digest.
    pub categories: Vec<Category>,
    /// Parameters for the shared fetch (quote watchlist).
    pub params: FetchParams,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 3,
            concurrency: 8,
            send_timeout: Duration::from_secs(10),
            categories: vec![Category::Offerings],
            params: FetchParams::default(),
        }
    }
}

/// One recipient the cycle could not reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub recipient: RecipientId,
    pub error: DeliveryError,
}

/// Outcome of one cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    /// Subscribed recipients loaded at the start of the cycle.
    pub recipients: usize,
    pub delivered: Vec<RecipientId>,
    /// Recipients whose filters left nothing to send.
    pub empty: Vec<RecipientId>,
    pub failures: Vec<DeliveryFailure>,
    /// Categories served from fallback data this cycle.
    pub degraded: Vec<Category>,
}

impl CycleReport {
    fn new(cycle_id: Uuid, recipients: usize) -> Self {
        Self {
            cycle_id,
            recipients,
            delivered: Vec::new(),
            empty: Vec::new(),
            failures: Vec::new(),
            degraded: Vec::new(),
        }
    }

    /// True when every attempted delivery succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Recipients a send was attempted for.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failures.len()
    }
}

/// Executes dispatch cycles against injected collaborators.
pub struct DispatchCycle {
    store: Arc<dyn PreferenceStore>,
    aggregator: Arc<Aggregator>,
    transport: Arc<dyn Transport>,
    config: DispatchConfig,
}

impl DispatchCycle {
    #[must_use]
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        aggregator: Arc<Aggregator>,
        transport: Arc<dyn Transport>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            store,
            aggregator,
            transport,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run one cycle to completion.
    ///
    /// # Errors
    /// Returns the store error if subscribers cannot be listed. Delivery
    /// failures never fail the cycle; they are collected in the report.
    pub async fn run(&self) -> Result<CycleReport, StoreError> {
        let cycle_id = Uuid::new_v4();

        let recipients = match self.store.list_subscribed().await {
            Ok(recipients) => recipients,
            Err(e) => {
                error!(
                    cycle_id = %cycle_id,
                    severity = "critical",
                    error = %e,
                    "Dispatch cycle aborted: cannot list subscribers"
                );
                return Err(e);
            }
        };

        let mut report = CycleReport::new(cycle_id, recipients.len());
        if recipients.is_empty() {
            info!(cycle_id = %cycle_id, "No subscribers, cycle skipped");
            return Ok(report);
        }

        let pool = self
            .aggregator
            .collect(&self.config.categories, &self.config.params)
            .await;
        report.degraded = pool.degraded().to_vec();
        debug!(
            cycle_id = %cycle_id,
            entities = pool.len(),
            fetched_at = %pool.fetched_at(),
            "Entity pool collected"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = Vec::with_capacity(recipients.len());

        for subscriber in &recipients {
            let batch = pool.personalize(
                subscriber.id,
                &subscriber.preferences,
                self.config.max_batch_size,
            );
            if batch.is_empty() {
                debug!(cycle_id = %cycle_id, recipient_id = %subscriber.id, "Nothing matched filters");
                report.empty.push(subscriber.id);
                continue;
            }

            let text = render::digest(&batch);
            let recipient = subscriber.id;
            let transport = Arc::clone(&self.transport);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.config.send_timeout;

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| DeliveryError::Aborted(e.to_string()))?;
                match tokio::time::timeout(timeout, transport.send(recipient, &text)).await {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::Timeout(timeout)),
                }
            });
            tasks.push((recipient, handle));
        }

        for (recipient, handle) in tasks {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => Err(DeliveryError::Aborted(join_err.to_string())),
            };
            match result {
                Ok(()) => {
                    debug!(cycle_id = %cycle_id, recipient_id = %recipient, "Digest delivered");
                    report.delivered.push(recipient);
                }
                Err(error) => {
                    warn!(
                        cycle_id = %cycle_id,
                        recipient_id = %recipient,
                        error = %error,
                        "Delivery failed"
                    );
                    report.failures.push(DeliveryFailure { recipient, error });
                }
            }
        }

        info!(
            cycle_id = %cycle_id,
            recipients = report.recipients,
            attempted = report.attempted(),
            delivered = report.delivered.len(),
            empty = report.empty.len(),
            failed = report.failures.len(),
            degraded = ?report.degraded,
            "Dispatch cycle complete"
        );
        Ok(report)
    }
}
