//! Rendering of entities into Telegram `MarkdownV2` text.
//!
//! Every piece of provider or user text goes through [`escape_markdown`];
//! only the bold/italic markers added here stay unescaped.

use std::fmt::Write as _;

use rust_decimal::Decimal;

use crate::domain::batch::{DispatchBatch, EntitySet};
use crate::domain::entity::{Detail, Entity, HeadlineDetail, OfferingDetail, QuoteDetail};
use crate::domain::sip::SipProjection;
use crate::domain::subscriber::Subscriber;

const MISSING: &str = "—";
const FALLBACK_NOTICE: &str = "Live data unavailable, showing reference listings.";
/// Longest headline title rendered before eliding.
const HEADLINE_CHARS: usize = 120;

/// Daily digest for one recipient.
#[must_use]
pub fn digest(batch: &DispatchBatch) -> String {
    let mut msg = String::from("📢 *Daily IPO Update*\n\n");
    msg.push_str(&cards(&batch.entities));
    if batch.has_fallback() {
        push_fallback_notice(&mut msg);
    }
    msg
}

/// On-demand list of open offerings.
#[must_use]
pub fn upcoming(set: &EntitySet) -> String {
    let mut msg = String::from("📢 *Upcoming IPOs*\n\n");
    if set.is_empty() {
        msg.push_str(&escape_markdown("No open IPOs right now."));
    } else {
        msg.push_str(&cards(set.entities()));
    }
    if set.is_degraded() {
        push_fallback_notice(&mut msg);
    }
    msg
}

/// GMP and expected listing gain, one line per offering.
#[must_use]
pub fn predictions(set: &EntitySet) -> String {
    let mut msg = String::from("📊 *Listing Gain Predictions*\n\n");
    let lines: Vec<String> = set
        .entities()
        .iter()
        .filter_map(|e| match &e.detail {
            Detail::Offering(o) => Some(escape_markdown(&format!(
                "{} → GMP {} | Gain {}",
                e.name,
                rupees(o.gmp),
                o.expected_gain.as_deref().unwrap_or(MISSING)
            ))),
            _ => None,
        })
        .collect();
    msg.push_str(&lines.join("\n\n"));
    if set.is_degraded() {
        push_fallback_notice(&mut msg);
    }
    msg
}

/// Market headlines.
#[must_use]
pub fn headlines(set: &EntitySet) -> String {
    let mut msg = String::from("📰 *Market News*\n\n");
    let lines: Vec<String> = set.entities().iter().map(render_entity).collect();
    msg.push_str(&lines.join("\n\n"));
    msg
}

/// Single instrument quote card.
#[must_use]
pub fn quote(entity: &Entity) -> String {
    let mut msg = render_entity(entity);
    if entity.is_fallback() {
        push_fallback_notice(&mut msg);
    }
    msg
}

/// SIP projection summary.
#[must_use]
pub fn sip(projection: &SipProjection) -> String {
    format!(
        "💰 *SIP Calculator Result*\n\n{}",
        escape_markdown(&format!(
            "Monthly: ₹{}\nInvested: ₹{}\nExpected Corpus: ₹{}\nAssumed Return: {}% p.a.",
            group_thousands(projection.monthly_amount),
            group_thousands(projection.invested),
            group_thousands(projection.corpus),
            (projection.annual_rate * 100.0).round() as i64
        ))
    )
}

/// Current settings of a subscriber.
#[must_use]
pub fn settings(subscriber: &Subscriber) -> String {
    let prefs = &subscriber.preferences;
    let body = format!(
        "Alerts: {}\nNotify time: {}\nSector: {}\nBudget: {}\nRisk: {}",
        if subscriber.subscribed { "on" } else { "off" },
        subscriber.notify_time,
        prefs.sector.as_deref().unwrap_or("any"),
        prefs.budget.map_or("any".to_string(), |b| b.to_string()),
        prefs.risk.map_or("any".to_string(), |r| r.to_string()),
    );
    format!("⚙️ *Settings*\n\n{}", escape_markdown(&body))
}

fn cards(entities: &[Entity]) -> String {
    entities
        .iter()
        .map(render_entity)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_entity(entity: &Entity) -> String {
    match &entity.detail {
        Detail::Offering(o) => offering_card(entity, o),
        Detail::Quote(q) => quote_card(entity, q),
        Detail::Headline(h) => headline_line(entity, h),
    }
}

fn offering_card(entity: &Entity, o: &OfferingDetail) -> String {
    let mut card = format!("📌 *{}*\n", escape_markdown(&entity.name));
    let dates = format!(
        "🗓 Open: {} – Close: {}",
        o.open_date.map_or(MISSING.to_string(), |d| d.to_string()),
        o.close_date.map_or(MISSING.to_string(), |d| d.to_string())
    );
    let lines = [
        dates,
        format!(
            "💰 Price Band: {}",
            o.price_band.map_or(MISSING.to_string(), |b| b.to_string())
        ),
        format!("📦 Lot Size: {}", o.lot_size.map_or(MISSING.to_string(), |l| l.to_string())),
        format!("📊 GMP: {}", rupees(o.gmp)),
        format!("📊 Expected Gain: {}", o.expected_gain.as_deref().unwrap_or(MISSING)),
        format!(
            "🔥 Risk: {}",
            entity.risk.map_or(MISSING.to_string(), |r| r.to_string())
        ),
    ];
    for line in lines {
        let _ = writeln!(card, "{}", escape_markdown(&line));
    }
    if let Some(sector) = &entity.sector {
        let _ = writeln!(card, "{}", escape_markdown(&format!("🏷 Sector: {sector}")));
    }
    if !o.summary.is_empty() {
        let _ = writeln!(card, "{}", escape_markdown(&format!("ℹ️ {}", o.summary)));
    }
    card
}

fn quote_card(entity: &Entity, q: &QuoteDetail) -> String {
    let body = format!(
        "💰 Price: {} (Change: {}%)\n⬆️ High: {} | ⬇️ Low: {}\n📊 52W High: {} | 52W Low: {}",
        number(q.price),
        number(q.change_pct),
        number(q.day_high),
        number(q.day_low),
        number(q.year_high),
        number(q.year_low),
    );
    format!("📈 *{}*\n{}", escape_markdown(&entity.name), escape_markdown(&body))
}

fn headline_line(entity: &Entity, h: &HeadlineDetail) -> String {
    let mut line = format!("📰 {}", escape_markdown(&truncate(&entity.name, HEADLINE_CHARS)));
    if let Some(source) = &h.source {
        let _ = write!(line, " _{}_", escape_markdown(&format!("({source})")));
    }
    line
}

fn push_fallback_notice(msg: &mut String) {
    let _ = write!(msg, "\n\nℹ️ _{}_", escape_markdown(FALLBACK_NOTICE));
}

fn number(value: Option<Decimal>) -> String {
    value.map_or(MISSING.to_string(), |v| v.normalize().to_string())
}

fn rupees(value: Option<Decimal>) -> String {
    value.map_or(MISSING.to_string(), |v| format!("₹{}", v.normalize()))
}

/// `1234567` → `1,234,567`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate a string with ellipsis (Unicode-safe).
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
        '\\',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}
