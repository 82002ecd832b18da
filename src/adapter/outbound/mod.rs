//! Outbound adapters (driven side).

pub mod memory;
pub mod notifier;
pub mod source;
pub mod sqlite;
