use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::models::insight::{AiInsight, GenerateInsightRequest, GenerateInsightResponse, InsightBody};
use crate::models::ListQuery;
use crate::services::insight::generate_insight;
use crate::AppState;

const DEFAULT_LIMIT: u32 = 5;

/// Generation failures never fail the request: the fallback text is stored
/// and returned with `source: "fallback"`.
pub async fn create_insight(
    State(state): State<AppState>,
    AppJson(body): AppJson<GenerateInsightRequest>,
) -> AppResult<Json<GenerateInsightResponse>> {
    let user_id = body
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::BadRequest("user_id required".into()))?;

    let (insight, outcome) = generate_insight(
        state.store.as_ref(),
        state.generator.as_ref(),
        &user_id,
        body.insight_type,
    )
    .await?;

    Ok(Json(GenerateInsightResponse {
        success: true,
        insight: InsightBody {
            content: insight.content,
            insight_type: insight.insight_type,
            generated_at: insight.generated_at,
            source: outcome.source(),
        },
    }))
}

pub async fn list_insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<Json<Vec<AiInsight>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let insights = state.store.recent_insights(&user_id, limit).await?;
    Ok(Json(insights))
}
