//! Per-subscriber entity filtering.
//!
//! Pure functions, no I/O. Every configured dimension narrows the result
//! independently; an unset dimension matches everything. An entity missing
//! the attribute an active dimension needs does not match (fail closed).
//! Provenance is never inspected.

use super::entity::Entity;
use super::subscriber::Preferences;

/// Decide whether `entity` belongs in a batch for `prefs`.
#[must_use]
pub fn matches(entity: &Entity, prefs: &Preferences) -> bool {
    matches_sector(entity, prefs) && matches_budget(entity, prefs) && matches_risk(entity, prefs)
}

/// Apply [`matches`] to a slice, keeping order, up to `limit` entities.
#[must_use]
pub fn select<'a>(entities: &'a [Entity], prefs: &Preferences, limit: usize) -> Vec<&'a Entity> {
    entities
        .iter()
        .filter(|e| matches(e, prefs))
        .take(limit)
        .collect()
}

fn matches_sector(entity: &Entity, prefs: &Preferences) -> bool {
    let Some(wanted) = prefs.sector.as_deref() else {
        return true;
    };
    entity
        .sector
        .as_deref()
        .is_some_and(|have| have.trim().eq_ignore_ascii_case(wanted.trim()))
}

fn matches_budget(entity: &Entity, prefs: &Preferences) -> bool {
    let Some(budget) = prefs.budget else {
        return true;
    };
    entity
        .min_investment()
        .is_some_and(|amount| budget.contains(amount))
}

fn matches_risk(entity: &Entity, prefs: &Preferences) -> bool {
    let Some(wanted) = prefs.risk else {
        return true;
    };
    entity.risk == Some(wanted)
}
