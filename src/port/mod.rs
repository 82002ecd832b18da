//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │       Application       │
//!     ┌──────────────┤  Aggregator + Dispatch  ├──────────────┐
//!     │              └────────────┬────────────┘              │
//!     ▼                           ▼                           ▼
//! ┌──────────┐            ┌───────────────┐             ┌───────────┐
//! │DataSource│            │PreferenceStore│             │ Transport │
//! │ Adapter  │            │    Adapter    │             │  Adapter  │
//! └──────────┘            └───────────────┘             └───────────┘
//! ```

pub mod outbound;
