use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, Utc};

use crate::error::AppResult;
use crate::models::dashboard::{DashboardCounts, DashboardStats, DASHBOARD_WINDOW_DAYS};
use crate::AppState;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<DashboardStats>> {
    let since = Utc::now() - Duration::days(DASHBOARD_WINDOW_DAYS);
    let store = &state.store;

    let counts = DashboardCounts {
        total_entries: store.count_journal_entries(&user_id, None).await?,
        recent_entries: store.count_journal_entries(&user_id, Some(since)).await?,
        avg_mood: store.average_mood_since(&user_id, since).await?,
        total_habits: store.count_habit_entries(&user_id, since, false).await?,
        completed_habits: store.count_habit_entries(&user_id, since, true).await?,
    };

    Ok(Json(counts.into()))
}
