//! Transport that writes digests to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use crate::domain::id::RecipientId;
use crate::error::DeliveryError;
use crate::port::outbound::transport::Transport;

/// Dry-run transport used when Telegram is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn send(&self, recipient: RecipientId, text: &str) -> Result<(), DeliveryError> {
        info!(recipient_id = %recipient, chars = text.chars().count(), "Dry-run delivery");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_transport_always_succeeds() {
        let transport = LogTransport;
        assert!(transport.send(RecipientId::new(1), "hello").await.is_ok());
    }
}
