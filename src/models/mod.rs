pub mod dashboard;
pub mod habit;
pub mod insight;
pub mod journal;
pub mod user;

use serde::Deserialize;

/// `?limit=` on list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}
