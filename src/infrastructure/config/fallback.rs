//! Loading of the static fallback table.
//!
//! The table is TOML with one array per category. The crate embeds
//! `config/fallback.toml`; `sources.fallback_path` replaces it.

use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::entity::{Category, Entity, HeadlineDetail, OfferingDetail, PriceBand, QuoteDetail};
use crate::domain::fallback::FallbackTable;
use crate::domain::subscriber::RiskTier;
use crate::error::ConfigError;

const BUILTIN: &str = include_str!("../../../config/fallback.toml");

#[derive(Debug, Default, Deserialize)]
struct FallbackFile {
    #[serde(default)]
    offerings: Vec<OfferingRow>,
    #[serde(default)]
    quotes: Vec<QuoteRow>,
    #[serde(default)]
    headlines: Vec<HeadlineRow>,
}

#[derive(Debug, Deserialize)]
struct OfferingRow {
    name: String,
    open_date: Option<NaiveDate>,
    close_date: Option<NaiveDate>,
    price_band: Option<String>,
    lot_size: Option<u32>,
    gmp: Option<Decimal>,
    expected_gain: Option<String>,
    risk: Option<String>,
    sector: Option<String>,
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct QuoteRow {
    symbol: String,
    price: Option<Decimal>,
    change_pct: Option<Decimal>,
    day_high: Option<Decimal>,
    day_low: Option<Decimal>,
    year_high: Option<Decimal>,
    year_low: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct HeadlineRow {
    title: String,
    source: Option<String>,
    url: Option<String>,
}

impl OfferingRow {
    fn into_entity(self) -> Result<Entity, ConfigError> {
        let price_band = match self.price_band.as_deref() {
            Some(raw) => Some(raw.parse::<PriceBand>().map_err(|()| ConfigError::InvalidValue {
                field: "offerings.price_band",
                reason: format!("{raw:?} is not a price band"),
            })?),
            None => None,
        };
        let risk = match self.risk.as_deref() {
            Some(raw) => Some(raw.parse::<RiskTier>().map_err(|e| ConfigError::InvalidValue {
                field: "offerings.risk",
                reason: e.to_string(),
            })?),
            None => None,
        };

        let mut entity = Entity::offering(
            self.name,
            OfferingDetail {
                open_date: self.open_date,
                close_date: self.close_date,
                price_band,
                lot_size: self.lot_size,
                gmp: self.gmp,
                expected_gain: self.expected_gain,
                summary: self.summary,
            },
        );
        if let Some(risk) = risk {
            entity = entity.with_risk(risk);
        }
        if let Some(sector) = self.sector {
            entity = entity.with_sector(sector);
        }
        Ok(entity)
    }
}

impl From<QuoteRow> for Entity {
    fn from(row: QuoteRow) -> Self {
        Entity::quote(
            row.symbol.to_ascii_uppercase(),
            QuoteDetail {
                price: row.price,
                change_pct: row.change_pct,
                day_high: row.day_high,
                day_low: row.day_low,
                year_high: row.year_high,
                year_low: row.year_low,
            },
        )
    }
}

impl From<HeadlineRow> for Entity {
    fn from(row: HeadlineRow) -> Self {
        Entity::headline(
            row.title,
            HeadlineDetail {
                source: row.source,
                url: row.url,
            },
        )
    }
}

/// Parse a fallback table from TOML text.
///
/// # Errors
/// Returns [`ConfigError::Parse`] for malformed TOML and
/// [`ConfigError::InvalidValue`] for unparseable bands or risk tiers, or a
/// table without offerings or headlines.
pub fn parse_fallback(content: &str) -> Result<FallbackTable, ConfigError> {
    let file: FallbackFile = toml::from_str(content).map_err(ConfigError::Parse)?;
    if file.offerings.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "offerings",
            reason: "fallback table needs at least one offering".to_string(),
        });
    }
    if file.headlines.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "headlines",
            reason: "fallback table needs at least one headline".to_string(),
        });
    }

    let offerings = file
        .offerings
        .into_iter()
        .map(OfferingRow::into_entity)
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = FallbackTable::new();
    table.insert(Category::Offerings, offerings);
    table.insert(Category::Quotes, file.quotes.into_iter().map(Entity::from).collect());
    table.insert(
        Category::Headlines,
        file.headlines.into_iter().map(Entity::from).collect(),
    );
    Ok(table)
}

/// Load the fallback table from `path`, or the built-in one.
///
/// # Errors
/// Returns [`ConfigError::ReadFile`] if `path` cannot be read, or any
/// [`parse_fallback`] error.
pub fn load_fallback(path: Option<&Path>) -> Result<FallbackTable, ConfigError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            parse_fallback(&content)
        }
        None => parse_fallback(BUILTIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn builtin_table_has_reference_listings() {
        let table = load_fallback(None).unwrap();

        let offerings = table.get(Category::Offerings);
        assert_eq!(offerings.len(), 2);
        assert_eq!(offerings[0].name, "Green Energy Ltd");
        assert_eq!(offerings[0].min_investment(), Some(dec!(13500)));
        assert_eq!(offerings[1].risk, Some(RiskTier::High));
        assert!(offerings.iter().all(Entity::is_fallback));

        let headlines = table.get(Category::Headlines);
        assert_eq!(headlines[1].name, "Investors eye upcoming IPOs.");
    }

    #[test]
    fn builtin_table_has_no_quote_rows() {
        let table = load_fallback(None).unwrap();
        assert!(table.get(Category::Quotes).is_empty());
    }

    const MINIMAL_ROWS: &str = "[[offerings]]\nname = \"A\"\n\n[[headlines]]\ntitle = \"B\"\n";

    #[test]
    fn quote_rows_are_uppercased() {
        let content = format!("{MINIMAL_ROWS}\n[[quotes]]\nsymbol = \"tcs\"\nprice = 4100.5\n");
        let table = parse_fallback(&content).unwrap();
        let quotes = table.get(Category::Quotes);
        assert_eq!(quotes[0].name, "TCS");
    }

    #[test]
    fn bad_risk_is_rejected() {
        let err = parse_fallback("[[offerings]]\nname = \"X\"\nrisk = \"wild\"\n\n[[headlines]]\ntitle = \"B\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "offerings.risk", .. }));
    }

    #[test]
    fn table_without_offerings_is_rejected() {
        let err = parse_fallback("[[headlines]]\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "offerings", .. }));
    }

    #[test]
    fn table_without_headlines_is_rejected() {
        let err = parse_fallback("[[offerings]]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "headlines", .. }));
    }

    #[test]
    fn every_category_resolves_non_empty() {
        let table = load_fallback(None).unwrap();
        assert!(!table.resolve(Category::Offerings, &[]).is_empty());
        assert!(!table.resolve(Category::Headlines, &[]).is_empty());
        assert!(!table.resolve(Category::Quotes, &["INFY".to_string()]).is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_fallback(Some(Path::new("/nonexistent/fallback.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile(_)));
    }
}
