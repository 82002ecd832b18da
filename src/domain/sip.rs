//! Systematic investment plan projection.

use super::error::DomainError;

/// Result of a SIP projection, in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipProjection {
    pub monthly_amount: u64,
    pub years: u32,
    /// Assumed annual return as a fraction (0.12 = 12%).
    pub annual_rate: f64,
    pub invested: u64,
    pub corpus: u64,
}

/// Project the corpus of a monthly SIP with contributions at the start of
/// each month (annuity due), compounded monthly.
///
/// # Errors
/// Returns [`DomainError::NonPositiveSipInput`] if any input is zero or
/// negative, and [`DomainError::SipOutOfRange`] if the term, the invested
/// total or the corpus does not fit.
pub fn project(monthly_amount: u64, years: u32, annual_rate: f64) -> Result<SipProjection, DomainError> {
    if monthly_amount == 0 {
        return Err(DomainError::NonPositiveSipInput { field: "amount" });
    }
    if years == 0 {
        return Err(DomainError::NonPositiveSipInput { field: "years" });
    }
    if !annual_rate.is_finite() || annual_rate <= 0.0 {
        return Err(DomainError::NonPositiveSipInput { field: "rate" });
    }

    let months = years
        .checked_mul(12)
        .ok_or(DomainError::SipOutOfRange { field: "years" })?;
    let exponent = i32::try_from(months).map_err(|_| DomainError::SipOutOfRange { field: "years" })?;
    let invested = monthly_amount
        .checked_mul(u64::from(months))
        .ok_or(DomainError::SipOutOfRange { field: "amount" })?;

    let r = annual_rate / 12.0;
    let p = monthly_amount as f64;
    let growth = (1.0 + r).powi(exponent);
    let corpus = p * ((growth - 1.0) / r) * (1.0 + r);
    if !corpus.is_finite() || corpus >= u64::MAX as f64 {
        return Err(DomainError::SipOutOfRange { field: "corpus" });
    }

    Ok(SipProjection {
        monthly_amount,
        years,
        annual_rate,
        invested,
        corpus: corpus as u64,
    })
}
