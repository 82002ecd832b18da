//! Messaging transport port.

use async_trait::async_trait;

use crate::domain::id::RecipientId;
use crate::error::DeliveryError;

/// Delivers rendered text to one recipient.
///
/// Possibly slow and possibly failing; callers bound it with a timeout and
/// treat every error as affecting that recipient only.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, recipient: RecipientId, text: &str) -> Result<(), DeliveryError>;
}
