use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub entry_id: Uuid,
    pub user_id: String,
    pub title: String,
    pub content: String,
    /// Expected on a 1-10 scale; stored as given.
    pub mood: i32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: i32,
    pub date: Option<DateTime<Utc>>,
}

impl From<CreateJournalEntryRequest> for JournalEntry {
    fn from(req: CreateJournalEntryRequest) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            user_id: req.user_id,
            title: req.title,
            content: req.content,
            mood: req.mood,
            date: req.date.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateJournalEntryResponse {
    pub success: bool,
    pub entry_id: Uuid,
}
