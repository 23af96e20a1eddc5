use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One habit check-in. Every create inserts a new row; there is no
/// per-day upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HabitEntry {
    pub habit_id: Uuid,
    pub user_id: String,
    pub habit_name: String,
    pub completed: bool,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitEntryRequest {
    pub user_id: String,
    pub habit_name: String,
    #[serde(default)]
    pub completed: bool,
    pub date: Option<DateTime<Utc>>,
}

impl From<CreateHabitEntryRequest> for HabitEntry {
    fn from(req: CreateHabitEntryRequest) -> Self {
        Self {
            habit_id: Uuid::new_v4(),
            user_id: req.user_id,
            habit_name: req.habit_name,
            completed: req.completed,
            date: req.date.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateHabitEntryResponse {
    pub success: bool,
    pub habit_id: Uuid,
}
