//! Persistence for users, journal entries, habit entries and insights.
//!
//! Handlers only see [`ActivityStore`]; `main` picks the implementation from
//! configuration and injects it through `AppState`.

mod memory;
mod pool;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::habit::HabitEntry;
use crate::models::insight::AiInsight;
use crate::models::journal::JournalEntry;
use crate::models::user::UserProfile;

pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations};
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Insert/find/aggregate operations over the four collections.
///
/// Every `recent_*` query orders most-recent-first by the entity's timestamp
/// and returns at most `limit` rows. `since` bounds are inclusive.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn insert_user(&self, user: &UserProfile) -> StoreResult<()>;
    async fn find_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>>;

    async fn insert_journal_entry(&self, entry: &JournalEntry) -> StoreResult<()>;
    async fn recent_journal_entries(&self, user_id: &str, limit: u32) -> StoreResult<Vec<JournalEntry>>;
    /// Counts all of the user's journal entries, or only those dated at or
    /// after `since`.
    async fn count_journal_entries(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<i64>;
    /// Mean mood of entries dated at or after `since`; `None` when there are none.
    async fn average_mood_since(&self, user_id: &str, since: DateTime<Utc>) -> StoreResult<Option<f64>>;

    async fn insert_habit_entry(&self, habit: &HabitEntry) -> StoreResult<()>;
    async fn recent_habit_entries(&self, user_id: &str, limit: u32) -> StoreResult<Vec<HabitEntry>>;
    async fn count_habit_entries(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
        completed_only: bool,
    ) -> StoreResult<i64>;

    async fn insert_insight(&self, insight: &AiInsight) -> StoreResult<()>;
    async fn recent_insights(&self, user_id: &str, limit: u32) -> StoreResult<Vec<AiInsight>>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;

    /// Releases connections on shutdown.
    async fn close(&self) {}
}
