//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod aggregator;
pub mod dispatch;
pub mod render;
pub mod scheduler;
pub mod service;
