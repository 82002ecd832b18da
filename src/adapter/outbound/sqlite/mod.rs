//! SQLite persistence adapter.

pub mod database;
pub mod store;

pub use store::SqlitePreferenceStore;
