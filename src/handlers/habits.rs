use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::models::habit::{CreateHabitEntryRequest, CreateHabitEntryResponse, HabitEntry};
use crate::AppState;

pub const HABIT_LIST_CAP: u32 = 50;

/// Always inserts a new check-in, even for a habit already logged today.
pub async fn create_habit_entry(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateHabitEntryRequest>,
) -> AppResult<Json<CreateHabitEntryResponse>> {
    let habit = HabitEntry::from(body);
    state.store.insert_habit_entry(&habit).await?;

    tracing::debug!(
        user_id = %habit.user_id,
        habit_id = %habit.habit_id,
        completed = habit.completed,
        "Habit entry created"
    );

    Ok(Json(CreateHabitEntryResponse {
        success: true,
        habit_id: habit.habit_id,
    }))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<HabitEntry>>> {
    let habits = state
        .store
        .recent_habit_entries(&user_id, HABIT_LIST_CAP)
        .await?;
    Ok(Json(habits))
}
