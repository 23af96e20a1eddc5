use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;

use config::Config;
use db::ActivityStore;
use services::gemini::TextGenerator;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ActivityStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub config: Arc<Config>,
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/readyz", get(handlers::health::readyz))
        // Users
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/:user_id", get(handlers::users::get_user))
        // Journal
        .route("/api/journal", post(handlers::journal::create_journal_entry))
        .route(
            "/api/journal/:user_id",
            get(handlers::journal::list_journal_entries),
        )
        // Habits
        .route("/api/habits", post(handlers::habits::create_habit_entry))
        .route("/api/habits/:user_id", get(handlers::habits::list_habits))
        // Insights
        .route(
            "/api/insights/generate",
            post(handlers::insights::create_insight),
        )
        .route(
            "/api/insights/:user_id",
            get(handlers::insights::list_insights),
        )
        // Dashboard
        .route(
            "/api/dashboard/:user_id",
            get(handlers::dashboard::get_dashboard),
        );

    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    api.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    match allowed_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(hv) => Some(hv),
                    Err(_) => {
                        tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(origins)
        }
        None => layer.allow_origin(Any),
    }
}
