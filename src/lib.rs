//! ipowatch - subscription-based IPO alerts.
//!
//! Collects per-subscriber preferences, aggregates IPO listings, quotes and
//! headlines from unreliable providers, and sends each subscriber a filtered
//! daily digest. One recipient's delivery failure never affects another's.
//!
//! # Architecture
//!
//! - [`domain`] - Entities, subscriber preferences, filter engine, fallback table
//! - [`port`] - Traits for sources, the preference store and the transport
//! - [`application`] - Aggregator, dispatch cycle, scheduler, user-facing service
//! - [`adapter`] - HTTP sources, SQLite and in-memory stores, Telegram
//! - [`infrastructure`] - Configuration and composition root
//! - [`cli`] - Command-line interface
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery and command listener
//! - `testkit` - Test doubles for integration tests

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
