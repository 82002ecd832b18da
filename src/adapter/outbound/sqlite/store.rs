//! SQLite preference store implementation.
//!
//! Persists one row per recipient using Diesel. Every operation runs on the
//! blocking thread pool so slow disk I/O never stalls async handlers.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::database::model::{FilterChangeset, UserRow};
use crate::adapter::outbound::sqlite::database::schema::users;
use crate::domain::id::RecipientId;
use crate::domain::subscriber::{
    BudgetTier, FilterUpdate, NotifyTime, Patch, Preferences, RiskTier, Subscriber,
};
use crate::error::StoreError;
use crate::port::outbound::store::PreferenceStore;

/// SQLite-backed preference store.
#[derive(Clone)]
pub struct SqlitePreferenceStore {
    pool: DbPool,
}

impl SqlitePreferenceStore {
    /// Create a store over an existing, migrated pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database at `url` and apply migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be built or migrations fail.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let pool = create_pool(url)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Connection(format!("store task failed: {e}")))?
    }

    fn to_changeset(update: FilterUpdate) -> FilterChangeset {
        FilterChangeset {
            sector_filter: patch_text(update.sector, |s| s),
            budget_filter: patch_text(update.budget, |b| b.as_str().to_string()),
            risk_filter: patch_text(update.risk, |r| r.as_str().to_ascii_lowercase()),
        }
    }

    fn from_row(row: UserRow) -> Result<Subscriber, StoreError> {
        let id = RecipientId::new(row.chat_id);
        let corrupt = |field: &'static str, value: &str| StoreError::Corrupt {
            recipient: id,
            field,
            value: value.to_string(),
        };

        let notify_time: NotifyTime = row
            .notify_time
            .parse()
            .map_err(|_| corrupt("notify_time", &row.notify_time))?;
        let budget = non_empty(&row.budget_filter)
            .map(str::parse::<BudgetTier>)
            .transpose()
            .map_err(|_| corrupt("budget_filter", &row.budget_filter))?;
        let risk = non_empty(&row.risk_filter)
            .map(str::parse::<RiskTier>)
            .transpose()
            .map_err(|_| corrupt("risk_filter", &row.risk_filter))?;

        Ok(Subscriber {
            id,
            notify_time,
            preferences: Preferences {
                sector: non_empty(&row.sector_filter).map(str::to_string),
                budget,
                risk,
            },
            subscribed: row.subscribed != 0,
        })
    }
}

fn patch_text<T>(patch: Patch<T>, render: impl FnOnce(T) -> String) -> Option<String> {
    match patch {
        Patch::Keep => None,
        Patch::Set(value) => Some(render(value)),
        Patch::Clear => Some(String::new()),
    }
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn query_error(e: diesel::result::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

fn require_updated(recipient: RecipientId, rows: usize) -> Result<(), StoreError> {
    if rows == 0 {
        return Err(StoreError::RecipientNotFound(recipient));
    }
    Ok(())
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn ensure(&self, recipient: RecipientId) -> Result<(), StoreError> {
        self.run(move |conn| {
            diesel::insert_or_ignore_into(users::table)
                .values(users::chat_id.eq(recipient.get()))
                .execute(conn)
                .map_err(query_error)?;
            Ok(())
        })
        .await
    }

    async fn set_subscribed(&self, recipient: RecipientId, subscribed: bool) -> Result<(), StoreError> {
        self.run(move |conn| {
            let rows = diesel::update(users::table.find(recipient.get()))
                .set(users::subscribed.eq(i32::from(subscribed)))
                .execute(conn)
                .map_err(query_error)?;
            require_updated(recipient, rows)
        })
        .await
    }

    async fn set_filters(&self, recipient: RecipientId, update: FilterUpdate) -> Result<(), StoreError> {
        let changeset = Self::to_changeset(update);
        self.run(move |conn| {
            if changeset.is_empty() {
                // Diesel rejects an UPDATE with no columns; only check existence.
                let exists: i64 = users::table
                    .find(recipient.get())
                    .count()
                    .get_result(conn)
                    .map_err(query_error)?;
                return require_updated(recipient, exists as usize);
            }
            let rows = diesel::update(users::table.find(recipient.get()))
                .set(&changeset)
                .execute(conn)
                .map_err(query_error)?;
            require_updated(recipient, rows)
        })
        .await
    }

    async fn set_notify_time(&self, recipient: RecipientId, time: NotifyTime) -> Result<(), StoreError> {
        self.run(move |conn| {
            let rows = diesel::update(users::table.find(recipient.get()))
                .set(users::notify_time.eq(time.to_string()))
                .execute(conn)
                .map_err(query_error)?;
            require_updated(recipient, rows)
        })
        .await
    }

    async fn get(&self, recipient: RecipientId) -> Result<Option<Subscriber>, StoreError> {
        self.run(move |conn| {
            let row: Option<UserRow> = users::table
                .find(recipient.get())
                .select(UserRow::as_select())
                .first(conn)
                .optional()
                .map_err(query_error)?;
            row.map(Self::from_row).transpose()
        })
        .await
    }

    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, StoreError> {
        self.run(|conn| {
            let rows: Vec<UserRow> = users::table
                .filter(users::subscribed.ne(0))
                .order(users::chat_id.asc())
                .select(UserRow::as_select())
                .load(conn)
                .map_err(query_error)?;
            rows.into_iter().map(Self::from_row).collect()
        })
        .await
    }
}
