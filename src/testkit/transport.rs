//! Recording [`Transport`] with failure injection.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::id::RecipientId;
use crate::error::DeliveryError;
use crate::port::outbound::transport::Transport;

/// Injected behavior for one recipient.
#[derive(Debug, Clone)]
enum Fault {
    Fail(DeliveryError),
    Hang,
    Panic,
}

/// Records every successful send in order.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(RecipientId, String)>>,
    faults: HashMap<RecipientId, Fault>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends to `recipient` fail with `error`.
    pub fn failing_for(mut self, recipient: i64, error: DeliveryError) -> Self {
        self.faults.insert(RecipientId::new(recipient), Fault::Fail(error));
        self
    }

    /// Sends to `recipient` never complete.
    pub fn hanging_for(mut self, recipient: i64) -> Self {
        self.faults.insert(RecipientId::new(recipient), Fault::Hang);
        self
    }

    /// Sends to `recipient` panic.
    pub fn panicking_for(mut self, recipient: i64) -> Self {
        self.faults.insert(RecipientId::new(recipient), Fault::Panic);
        self
    }

    /// Snapshot of delivered messages.
    pub fn sent(&self) -> Vec<(RecipientId, String)> {
        self.sent.lock().clone()
    }

    /// Delivered message for a recipient, if any.
    pub fn message_for(&self, recipient: i64) -> Option<String> {
        self.sent
            .lock()
            .iter()
            .find(|(id, _)| id.get() == recipient)
            .map(|(_, text)| text.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, recipient: RecipientId, text: &str) -> Result<(), DeliveryError> {
        match self.faults.get(&recipient) {
            Some(Fault::Fail(error)) => return Err(error.clone()),
            Some(Fault::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Some(Fault::Panic) => panic!("transport panicked for {recipient}"),
            None => {}
        }
        self.sent.lock().push((recipient, text.to_string()));
        Ok(())
    }
}
