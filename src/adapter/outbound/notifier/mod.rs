//! Delivery adapters.
//!
//! Implements the `port::outbound::transport::Transport` trait for Telegram
//! and for log-only dry runs.

pub mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogTransport;
