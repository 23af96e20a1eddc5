use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::user::{CreateUserRequest, CreateUserResponse, UserProfile};
use crate::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateUserRequest>,
) -> AppResult<Json<CreateUserResponse>> {
    let user = UserProfile::new(body.source, body.name);
    state.store.insert_user(&user).await?;

    tracing::info!(user_id = %user.user_id, source = %user.source, "User created");

    Ok(Json(CreateUserResponse {
        success: true,
        user_id: user.user_id,
        source: user.source,
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .store
        .find_user(&user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user))
}
