//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Entity`] and [`Subscriber`]
//! so tests focus on assertions rather than construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::entity::{Entity, HeadlineDetail, OfferingDetail, PriceBand};
use crate::domain::id::RecipientId;
use crate::domain::subscriber::{Preferences, RiskTier, Subscriber};

/// Offering with no band, lot or risk.
pub fn offering(name: &str) -> Entity {
    Entity::offering(name, OfferingDetail::default())
}

/// Offering tagged with a risk tier.
pub fn risky_offering(name: &str, risk: RiskTier) -> Entity {
    offering(name).with_risk(risk)
}

/// Offering whose minimum investment is `high * lot`.
pub fn priced_offering(name: &str, high: i64, lot: u32) -> Entity {
    Entity::offering(
        name,
        OfferingDetail {
            price_band: Some(PriceBand::new(Decimal::from(high), Decimal::from(high))),
            lot_size: Some(lot),
            ..OfferingDetail::default()
        },
    )
}

/// Headline with no source.
pub fn headline(title: &str) -> Entity {
    Entity::headline(title, HeadlineDetail::default())
}

/// Subscribed recipient with the given preferences.
pub fn subscriber(id: i64, preferences: Preferences) -> Subscriber {
    Subscriber {
        preferences,
        subscribed: true,
        ..Subscriber::new(RecipientId::new(id))
    }
}

/// Preferences constrained only by risk.
pub fn risk_only(risk: RiskTier) -> Preferences {
    Preferences {
        risk: Some(risk),
        ..Preferences::default()
    }
}
