//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Canned [`DataSource`](crate::port::outbound::source::DataSource)
//!   implementations: `StaticSource` (fixed or alternating data).
//! - [`transport`] - `RecordingTransport` with per-recipient failure injection.
//! - [`store`] - `FailingStore`, a preference store that is always offline.
//! - [`domain`] - Builders for entities and subscribers.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod source;
pub mod store;
pub mod transport;
