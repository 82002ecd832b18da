//! Infrastructure configuration modules.

pub mod dispatch;
pub mod fallback;
pub mod logging;
pub mod settings;
pub mod sources;
pub mod telegram;
