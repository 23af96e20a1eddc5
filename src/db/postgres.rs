use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{ActivityStore, StoreResult};
use crate::models::habit::HabitEntry;
use crate::models::insight::AiInsight;
use crate::models::journal::JournalEntry;
use crate::models::user::UserProfile;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgStore {
    async fn insert_user(&self, user: &UserProfile) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (user_id, source, name, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&user.user_id)
        .bind(&user.source)
        .bind(&user.name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_journal_entry(&self, entry: &JournalEntry) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO journal_entries (entry_id, user_id, title, content, mood, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.entry_id)
        .bind(&entry.user_id)
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.mood)
        .bind(entry.date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_journal_entries(&self, user_id: &str, limit: u32) -> StoreResult<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn count_journal_entries(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM journal_entries
            WHERE user_id = $1 AND ($2::timestamptz IS NULL OR date >= $2)
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn average_mood_since(&self, user_id: &str, since: DateTime<Utc>) -> StoreResult<Option<f64>> {
        let avg = sqlx::query_scalar::<_, Option<f64>>(
            r#"
            SELECT AVG(mood)::float8 FROM journal_entries
            WHERE user_id = $1 AND date >= $2
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(avg)
    }

    async fn insert_habit_entry(&self, habit: &HabitEntry) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO habit_entries (habit_id, user_id, habit_name, completed, date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(habit.habit_id)
        .bind(&habit.user_id)
        .bind(&habit.habit_name)
        .bind(habit.completed)
        .bind(habit.date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_habit_entries(&self, user_id: &str, limit: u32) -> StoreResult<Vec<HabitEntry>> {
        let habits = sqlx::query_as::<_, HabitEntry>(
            r#"
            SELECT * FROM habit_entries
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(habits)
    }

    async fn count_habit_entries(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
        completed_only: bool,
    ) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM habit_entries
            WHERE user_id = $1 AND date >= $2 AND (NOT $3 OR completed)
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(completed_only)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn insert_insight(&self, insight: &AiInsight) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_insights (insight_id, user_id, content, insight_type, generated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(insight.insight_id)
        .bind(&insight.user_id)
        .bind(&insight.content)
        .bind(insight.insight_type)
        .bind(insight.generated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_insights(&self, user_id: &str, limit: u32) -> StoreResult<Vec<AiInsight>> {
        let insights = sqlx::query_as::<_, AiInsight>(
            r#"
            SELECT * FROM ai_insights
            WHERE user_id = $1
            ORDER BY generated_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(insights)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
