//! Normalized entities produced by data sources.
//!
//! An [`Entity`] is one unit of fetched data: an IPO offering, an instrument
//! quote, or a headline. Entities are immutable once a fetch produced them;
//! the next fetch yields a complete new set.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::subscriber::RiskTier;

/// Category of external data a source produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Open IPO offerings.
    Offerings,
    /// Exchange quotes for single instruments.
    Quotes,
    /// Business headlines.
    Headlines,
}

impl Category {
    /// Lowercase name used in config and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offerings => "offerings",
            Self::Quotes => "quotes",
            Self::Headlines => "headlines",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Produced from a successful provider call.
    #[default]
    Live,
    /// Substituted from the static fallback table.
    Fallback,
}

/// Issue price band in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceBand {
    /// Create a band, ordering the bounds.
    #[must_use]
    pub fn new(a: Decimal, b: Decimal) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "₹{}", self.high.normalize())
        } else {
            write!(f, "₹{} – ₹{}", self.low.normalize(), self.high.normalize())
        }
    }
}

impl FromStr for PriceBand {
    type Err = ();

    /// Parse provider text such as `"₹120 – ₹135"`, `"120-135"` or `"1,050"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers: Vec<Decimal> = s
            .split(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .map(|part| part.replace(',', ""))
            .map(|part| part.trim_matches('.').to_string())
            .filter(|part| !part.is_empty())
            .filter_map(|part| part.parse::<Decimal>().ok())
            .collect();

        match numbers.as_slice() {
            [single] => Ok(Self::new(*single, *single)),
            [low, high, ..] => Ok(Self::new(*low, *high)),
            [] => Err(()),
        }
    }
}

/// Offering-specific attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OfferingDetail {
    pub open_date: Option<NaiveDate>,
    pub close_date: Option<NaiveDate>,
    pub price_band: Option<PriceBand>,
    pub lot_size: Option<u32>,
    /// Grey-market premium per share, rupees.
    pub gmp: Option<Decimal>,
    /// Free-text expected listing gain, e.g. `"15–20%"`.
    pub expected_gain: Option<String>,
    pub summary: String,
}

/// Quote-specific attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteDetail {
    pub price: Option<Decimal>,
    pub change_pct: Option<Decimal>,
    pub day_high: Option<Decimal>,
    pub day_low: Option<Decimal>,
    pub year_high: Option<Decimal>,
    pub year_low: Option<Decimal>,
}

/// Headline-specific attributes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeadlineDetail {
    pub source: Option<String>,
    pub url: Option<String>,
}

/// Category-specific attributes of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Detail {
    Offering(OfferingDetail),
    Quote(QuoteDetail),
    Headline(HeadlineDetail),
}

/// One normalized unit of fetched data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Display name: company, symbol, or headline title.
    pub name: String,
    /// Industry sector tag, when the provider publishes one.
    pub sector: Option<String>,
    /// Risk tier tag.
    pub risk: Option<RiskTier>,
    pub detail: Detail,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Entity {
    /// Create a live offering entity.
    #[must_use]
    pub fn offering(name: impl Into<String>, detail: OfferingDetail) -> Self {
        Self {
            name: name.into(),
            sector: None,
            risk: None,
            detail: Detail::Offering(detail),
            provenance: Provenance::Live,
        }
    }

    /// Create a live quote entity.
    #[must_use]
    pub fn quote(symbol: impl Into<String>, detail: QuoteDetail) -> Self {
        Self {
            name: symbol.into(),
            sector: None,
            risk: None,
            detail: Detail::Quote(detail),
            provenance: Provenance::Live,
        }
    }

    /// Create a live headline entity.
    #[must_use]
    pub fn headline(title: impl Into<String>, detail: HeadlineDetail) -> Self {
        Self {
            name: title.into(),
            sector: None,
            risk: None,
            detail: Detail::Headline(detail),
            provenance: Provenance::Live,
        }
    }

    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    #[must_use]
    pub fn with_risk(mut self, risk: RiskTier) -> Self {
        self.risk = Some(risk);
        self
    }

    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Category implied by the entity's detail.
    #[must_use]
    pub fn category(&self) -> Category {
        match self.detail {
            Detail::Offering(_) => Category::Offerings,
            Detail::Quote(_) => Category::Quotes,
            Detail::Headline(_) => Category::Headlines,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }

    /// Smallest amount needed to take a position, in rupees.
    ///
    /// One lot at the top of the band for offerings; one share for quotes.
    /// Headlines have none, and neither does a band too large to multiply.
    #[must_use]
    pub fn min_investment(&self) -> Option<Decimal> {
        match &self.detail {
            Detail::Offering(o) => {
                let band = o.price_band?;
                let lot = o.lot_size?;
                band.high.checked_mul(Decimal::from(lot))
            }
            Detail::Quote(q) => q.price,
            Detail::Headline(_) => None,
        }
    }
}
