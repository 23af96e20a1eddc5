use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A profile created by one of the SourceSpace apps (`novaverse`, `echoverse`,
/// `logiverse`). The source tag is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: String,
    pub source: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(source: String, name: Option<String>) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            source,
            name,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub source: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub success: bool,
    pub user_id: String,
    pub source: String,
}
