//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Recipient identifier - newtype over the transport's chat id.
///
/// Primary key of the preference store; one record per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipientId(i64);

impl RecipientId {
    /// Create a new `RecipientId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecipientId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_id_display_is_raw_number() {
        assert_eq!(RecipientId::new(-100_123).to_string(), "-100123");
    }

    #[test]
    fn recipient_id_orders_numerically() {
        assert!(RecipientId::new(2) < RecipientId::new(10));
    }
}
