//! Subscriber records and notification preferences.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::RecipientId;

/// Risk tier attached to entities and used as a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" | "medium" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            _ => Err(DomainError::UnknownRiskTier(s.to_string())),
        }
    }
}

/// Budget tier: a range of minimum investment in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// Below ₹15,000.
    Low,
    /// ₹15,000 up to (not including) ₹50,000.
    Medium,
    /// ₹50,000 and above.
    High,
}

const BUDGET_LOW_CEILING: Decimal = Decimal::from_parts(15_000, 0, 0, false, 0);
const BUDGET_MEDIUM_CEILING: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

impl BudgetTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Half-open `[floor, ceiling)` range; `None` ceiling is unbounded.
    #[must_use]
    pub const fn bounds(self) -> (Decimal, Option<Decimal>) {
        match self {
            Self::Low => (Decimal::ZERO, Some(BUDGET_LOW_CEILING)),
            Self::Medium => (BUDGET_LOW_CEILING, Some(BUDGET_MEDIUM_CEILING)),
            Self::High => (BUDGET_MEDIUM_CEILING, None),
        }
    }

    /// Whether an investment amount falls inside this tier.
    #[must_use]
    pub fn contains(self, amount: Decimal) -> bool {
        let (floor, ceiling) = self.bounds();
        amount >= floor && ceiling.map_or(true, |c| amount < c)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "mid" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(DomainError::UnknownBudget(s.to_string())),
        }
    }
}

/// Preferred delivery time of day, `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyTime(NaiveTime);

impl NotifyTime {
    #[must_use]
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    #[must_use]
    pub fn time(self) -> NaiveTime {
        self.0
    }
}

impl Default for NotifyTime {
    fn default() -> Self {
        Self(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl fmt::Display for NotifyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for NotifyTime {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| DomainError::InvalidNotifyTime(s.to_string()))
    }
}

/// Filter preferences. Each dimension is independently optional;
/// `None` imposes no constraint on that axis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub sector: Option<String>,
    pub budget: Option<BudgetTier>,
    pub risk: Option<RiskTier>,
}

impl Preferences {
    /// True when no dimension is constrained.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.sector.is_none() && self.budget.is_none() && self.risk.is_none()
    }
}

/// Change to a single optional field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    #[default]
    Keep,
    Set(T),
    /// Remove the constraint.
    Clear,
}

impl<T> Patch<T> {
    #[must_use]
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Apply to a current value.
    pub fn apply(self, current: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *current = Some(value),
            Self::Clear => *current = None,
        }
    }
}

/// Partial update of filter preferences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub sector: Patch<String>,
    pub budget: Patch<BudgetTier>,
    pub risk: Patch<RiskTier>,
}

impl FilterUpdate {
    /// Set the sector filter, rejecting blank text.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptySector`] for empty input.
    pub fn sector(sector: &str) -> Result<Self, DomainError> {
        let sector = sector.trim();
        if sector.is_empty() {
            return Err(DomainError::EmptySector);
        }
        Ok(Self {
            sector: Patch::Set(sector.to_string()),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn budget(budget: BudgetTier) -> Self {
        Self {
            budget: Patch::Set(budget),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn risk(risk: RiskTier) -> Self {
        Self {
            risk: Patch::Set(risk),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sector.is_keep() && self.budget.is_keep() && self.risk.is_keep()
    }

    /// Apply onto existing preferences; kept fields are untouched.
    pub fn apply_to(self, prefs: &mut Preferences) {
        self.sector.apply(&mut prefs.sector);
        self.budget.apply(&mut prefs.budget);
        self.risk.apply(&mut prefs.risk);
    }
}

/// One registered recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: RecipientId,
    pub notify_time: NotifyTime,
    pub preferences: Preferences,
    pub subscribed: bool,
}

impl Subscriber {
    /// Default record created on first contact: not subscribed, no filters.
    #[must_use]
    pub fn new(id: RecipientId) -> Self {
        Self {
            id,
            notify_time: NotifyTime::default(),
            preferences: Preferences::default(),
            subscribed: false,
        }
    }
}
