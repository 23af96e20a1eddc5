//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sourcespace_api::config::Config;
use sourcespace_api::db::MemoryStore;
use sourcespace_api::services::gemini::{GenerationError, TextGenerator};
use sourcespace_api::{build_router, AppState};
use tower::ServiceExt;

/// Generator that always answers with the same text.
pub struct EchoGenerator(pub &'static str);

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

/// Generator that behaves like an unreachable API.
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Api {
            status: 503,
            body: "service unavailable".into(),
        })
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "STORE_BACKEND" => Some("memory".into()),
        _ => None,
    })
    .expect("memory config is valid")
}

pub fn build_test_app(generator: Arc<dyn TextGenerator>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
        generator,
        config: Arc::new(test_config()),
    };
    (build_router(state), store)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POSTs and asserts 200, returning the parsed body.
pub async fn post_ok(app: &Router, uri: &str, body: Value) -> Value {
    let response = post_json(app, uri, body).await;
    assert_eq!(response.status(), StatusCode::OK, "POST {uri} failed");
    body_json(response).await
}

/// GETs and asserts 200, returning the parsed body.
pub async fn get_ok(app: &Router, uri: &str) -> Value {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri} failed");
    body_json(response).await
}
