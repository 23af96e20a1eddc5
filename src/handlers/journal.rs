use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::models::journal::{CreateJournalEntryRequest, CreateJournalEntryResponse, JournalEntry};
use crate::models::ListQuery;
use crate::AppState;

const DEFAULT_LIMIT: u32 = 10;

pub async fn create_journal_entry(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateJournalEntryRequest>,
) -> AppResult<Json<CreateJournalEntryResponse>> {
    let entry = JournalEntry::from(body);
    state.store.insert_journal_entry(&entry).await?;

    tracing::debug!(user_id = %entry.user_id, entry_id = %entry.entry_id, "Journal entry created");

    Ok(Json(CreateJournalEntryResponse {
        success: true,
        entry_id: entry.entry_id,
    }))
}

pub async fn list_journal_entries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let entries = state.store.recent_journal_entries(&user_id, limit).await?;
    Ok(Json(entries))
}
