//! Domain validation errors for core domain types.
//!
//! These errors are returned when user-supplied or persisted text cannot be
//! turned into a domain value (risk tiers, budget tiers, notify times, SIP
//! parameters).
//!
//! # Examples
//!
//! ```
//! use ipowatch::domain::error::DomainError;
//! use ipowatch::domain::subscriber::RiskTier;
//!
//! let result: Result<RiskTier, _> = "reckless".parse();
//! assert!(matches!(result, Err(DomainError::UnknownRiskTier(_))));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Risk tier text did not name a known tier.
    #[error("unknown risk tier `{0}` (use: low, moderate, high)")]
    UnknownRiskTier(String),

    /// Budget tier text did not name a known tier.
    #[error("unknown budget `{0}` (use: low, medium, high)")]
    UnknownBudget(String),

    /// Notify time was not a valid `HH:MM` wall-clock time.
    #[error("invalid notify time `{0}` (expected HH:MM)")]
    InvalidNotifyTime(String),

    /// Sector text was empty after trimming.
    #[error("sector cannot be empty")]
    EmptySector,

    /// SIP inputs must be positive.
    #[error("SIP {field} must be positive")]
    NonPositiveSipInput {
        /// Which input was rejected.
        field: &'static str,
    },

    /// SIP inputs too large to project.
    #[error("SIP {field} is too large")]
    SipOutOfRange {
        /// Which input or result overflowed.
        field: &'static str,
    },
}
