use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{ActivityStore, StoreResult};
use crate::models::habit::HabitEntry;
use crate::models::insight::AiInsight;
use crate::models::journal::JournalEntry;
use crate::models::user::UserProfile;

#[derive(Default)]
struct Collections {
    users: Vec<UserProfile>,
    journal_entries: Vec<JournalEntry>,
    habit_entries: Vec<HabitEntry>,
    insights: Vec<AiInsight>,
}

/// Process-local store for development and tests. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, then truncate. Equal timestamps put the later insert first.
fn most_recent<T>(
    items: impl Iterator<Item = T>,
    timestamp: impl Fn(&T) -> DateTime<Utc>,
    limit: u32,
) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.reverse();
    items.sort_by(|a, b| timestamp(b).cmp(&timestamp(a)));
    items.truncate(limit as usize);
    items
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn insert_user(&self, user: &UserProfile) -> StoreResult<()> {
        self.inner.write().await.users.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn insert_journal_entry(&self, entry: &JournalEntry) -> StoreResult<()> {
        self.inner.write().await.journal_entries.push(entry.clone());
        Ok(())
    }

    async fn recent_journal_entries(&self, user_id: &str, limit: u32) -> StoreResult<Vec<JournalEntry>> {
        let inner = self.inner.read().await;
        Ok(most_recent(
            inner.journal_entries.iter().filter(|e| e.user_id == user_id).cloned(),
            |e| e.date,
            limit,
        ))
    }

    async fn count_journal_entries(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        let count = inner
            .journal_entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| since.map_or(true, |since| e.date >= since))
            .count();
        Ok(count as i64)
    }

    async fn average_mood_since(&self, user_id: &str, since: DateTime<Utc>) -> StoreResult<Option<f64>> {
        let inner = self.inner.read().await;
        let moods: Vec<i32> = inner
            .journal_entries
            .iter()
            .filter(|e| e.user_id == user_id && e.date >= since)
            .map(|e| e.mood)
            .collect();

        if moods.is_empty() {
            return Ok(None);
        }
        let sum: f64 = moods.iter().map(|&m| f64::from(m)).sum();
        Ok(Some(sum / moods.len() as f64))
    }

    async fn insert_habit_entry(&self, habit: &HabitEntry) -> StoreResult<()> {
        self.inner.write().await.habit_entries.push(habit.clone());
        Ok(())
    }

    async fn recent_habit_entries(&self, user_id: &str, limit: u32) -> StoreResult<Vec<HabitEntry>> {
        let inner = self.inner.read().await;
        Ok(most_recent(
            inner.habit_entries.iter().filter(|h| h.user_id == user_id).cloned(),
            |h| h.date,
            limit,
        ))
    }

    async fn count_habit_entries(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
        completed_only: bool,
    ) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        let count = inner
            .habit_entries
            .iter()
            .filter(|h| h.user_id == user_id && h.date >= since)
            .filter(|h| !completed_only || h.completed)
            .count();
        Ok(count as i64)
    }

    async fn insert_insight(&self, insight: &AiInsight) -> StoreResult<()> {
        self.inner.write().await.insights.push(insight.clone());
        Ok(())
    }

    async fn recent_insights(&self, user_id: &str, limit: u32) -> StoreResult<Vec<AiInsight>> {
        let inner = self.inner.read().await;
        Ok(most_recent(
            inner.insights.iter().filter(|i| i.user_id == user_id).cloned(),
            |i| i.generated_at,
            limit,
        ))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
