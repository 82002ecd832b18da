//! Transport-agnostic domain types and pure logic.
//!
//! - [`entity`] - Normalized entities (offerings, quotes, headlines)
//! - [`subscriber`] - Subscriber records and preference types
//! - [`filter`] - Per-subscriber filter engine
//! - [`batch`] - Shared entity sets and per-recipient batches
//! - [`fallback`] - Static fallback table
//! - [`sip`] - SIP projection

pub mod batch;
pub mod entity;
pub mod error;
pub mod fallback;
pub mod filter;
pub mod id;
pub mod sip;
pub mod subscriber;
