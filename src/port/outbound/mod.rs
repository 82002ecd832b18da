//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod source;
pub mod store;
pub mod transport;
