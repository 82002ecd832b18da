//! Provider wire formats and their normalization into entities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entity::{Entity, HeadlineDetail, OfferingDetail, PriceBand, QuoteDetail};
use crate::domain::subscriber::RiskTier;
use crate::error::FetchError;

/// `GET /ipos?status=open` response.
#[derive(Debug, Deserialize)]
pub struct IpoListResponse {
    #[serde(default)]
    pub data: Vec<IpoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpoItem {
    pub company: Option<String>,
    pub open_date: Option<String>,
    pub close_date: Option<String>,
    pub price_band: Option<Value>,
    pub lot_size: Option<Value>,
    pub exchange: Option<String>,
    pub gmp: Option<Value>,
    pub sector: Option<String>,
}

impl IpoItem {
    /// Normalize one listing. The provider publishes no risk tier, so live
    /// listings are tagged `Moderate`.
    pub fn into_entity(self) -> Entity {
        let detail = OfferingDetail {
            open_date: self.open_date.as_deref().and_then(parse_date),
            close_date: self.close_date.as_deref().and_then(parse_date),
            price_band: self.price_band.as_ref().and_then(value_text).and_then(|t| t.parse().ok()),
            lot_size: self.lot_size.as_ref().and_then(value_u32),
            gmp: self.gmp.as_ref().and_then(value_decimal),
            expected_gain: None,
            summary: self.exchange.unwrap_or_default(),
        };
        let name = self
            .company
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Unknown IPO".to_string());

        let entity = Entity::offering(name, detail).with_risk(RiskTier::Moderate);
        match self.sector.filter(|s| !s.trim().is_empty()) {
            Some(sector) => entity.with_sector(sector),
            None => entity,
        }
    }
}

/// NewsAPI `top-headlines` response.
#[derive(Debug, Deserialize)]
pub struct HeadlinesResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

impl Article {
    /// `None` for untitled or removed articles.
    pub fn into_entity(self) -> Option<Entity> {
        let title = self.title?.trim().to_string();
        if title.is_empty() || title == "[Removed]" {
            return None;
        }
        Some(Entity::headline(
            title,
            HeadlineDetail {
                source: self.source.and_then(|s| s.name),
                url: self.url,
            },
        ))
    }
}

/// Yahoo chart API response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub regular_market_price: Option<f64>,
    pub chart_previous_close: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

impl ChartResponse {
    /// Normalize into a quote entity named by `symbol`.
    pub fn into_entity(self, symbol: &str) -> Result<Entity, FetchError> {
        let meta = self
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .map(|r| r.meta)
            .ok_or_else(|| FetchError::Malformed(format!("no chart result for {symbol}")))?;

        let price = meta.regular_market_price.and_then(money);
        let previous = meta.chart_previous_close.and_then(money);
        let change_pct = match (price, previous) {
            (Some(p), Some(prev)) => percent_change(p, prev),
            _ => None,
        };

        Ok(Entity::quote(
            symbol.to_ascii_uppercase(),
            QuoteDetail {
                price,
                change_pct,
                day_high: meta.regular_market_day_high.and_then(money),
                day_low: meta.regular_market_day_low.and_then(money),
                year_high: meta.fifty_two_week_high.and_then(money),
                year_low: meta.fifty_two_week_low.and_then(money),
            },
        ))
    }
}

/// `None` for a zero base or a result outside `Decimal` range.
fn percent_change(price: Decimal, previous: Decimal) -> Option<Decimal> {
    price
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|pct| pct.round_dp(2))
}

fn money(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok().map(|d| d.round_dp(2))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// First number in a value such as `"₹30"`, `"30"` or `30`.
fn value_decimal(value: &Value) -> Option<Decimal> {
    value_text(value)
        .and_then(|t| t.parse::<PriceBand>().ok())
        .map(|band| band.low)
}
