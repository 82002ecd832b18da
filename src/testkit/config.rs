//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::time::Duration;

use crate::application::dispatch::DispatchConfig;
use crate::domain::entity::Category;

/// Dispatch config for offerings with short timeouts.
pub fn dispatch(max_batch_size: usize) -> DispatchConfig {
    DispatchConfig {
        max_batch_size,
        concurrency: 4,
        send_timeout: Duration::from_secs(1),
        categories: vec![Category::Offerings],
        ..DispatchConfig::default()
    }
}
