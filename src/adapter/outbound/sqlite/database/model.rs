//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::users;

/// Database row for a recipient.
///
/// Empty filter text means "no constraint".
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub chat_id: i64,
    pub notify_time: String,
    pub sector_filter: String,
    pub budget_filter: String,
    pub risk_filter: String,
    pub subscribed: i32,
}

/// Partial update of filter columns. `None` fields are left out of the
/// generated `UPDATE`, so they keep their stored value.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = users)]
pub struct FilterChangeset {
    pub sector_filter: Option<String>,
    pub budget_filter: Option<String>,
    pub risk_filter: Option<String>,
}

impl FilterChangeset {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sector_filter.is_none() && self.budget_filter.is_none() && self.risk_filter.is_none()
    }
}
