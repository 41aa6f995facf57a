//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - A router wired to an in-memory task store
//! - A store double whose every call fails
//! - Request and response helpers

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config};
use taskboard_shared::db::pool::DatabaseConfig;
use taskboard_shared::store::{MemoryTaskStore, TaskStore};
use tower::Service as _;

use doubles::FailingStore;

/// Test context containing the app and the store behind it
pub struct TestContext {
    pub store: MemoryTaskStore,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context backed by a fresh, empty in-memory store
    pub fn new() -> Self {
        let store = MemoryTaskStore::new();
        let app = app_with_store(Arc::new(store.clone()));
        TestContext { store, app }
    }

    /// Sends a request and returns the status and parsed JSON body
    ///
    /// The body is `Value::Null` when the response is not JSON.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send(&self.app, request).await
    }
}

/// Config used by every test router
pub fn test_config() -> Config {
    Config {
        api: ApiConfig::default(),
        database: DatabaseConfig::default(),
    }
}

/// Builds a router around any store
pub fn app_with_store(store: Arc<dyn TaskStore>) -> axum::Router {
    build_router(AppState::new(store, test_config()))
}

/// Builds a router whose store fails every call
pub fn failing_app() -> axum::Router {
    app_with_store(Arc::new(FailingStore))
}

pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    json_request("POST", uri, body.to_string())
}

pub fn put_json(uri: &str, body: Value) -> Request<Body> {
    json_request("PUT", uri, body.to_string())
}

/// Builds a JSON request from a raw body, for malformed-payload tests
pub fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

mod doubles {
    use taskboard_shared::models::{NewTask, Task, TaskChanges, TaskFilter, TaskId};
    use taskboard_shared::store::{StoreError, StoreResult, TaskStore};

    /// Store double that reports a lost connection on every call
    pub struct FailingStore;

    fn unavailable<T>() -> StoreResult<T> {
        Err(StoreError::Backend(
            "connection to 10.1.2.3:5432 refused".to_string(),
        ))
    }

    #[axum::async_trait]
    impl TaskStore for FailingStore {
        async fn insert(&self, _task: NewTask) -> StoreResult<Task> {
            unavailable()
        }

        async fn list(&self, _filter: TaskFilter) -> StoreResult<Vec<Task>> {
            unavailable()
        }

        async fn get(&self, _id: TaskId) -> StoreResult<Option<Task>> {
            unavailable()
        }

        async fn update(&self, _id: TaskId, _changes: TaskChanges) -> StoreResult<Option<Task>> {
            unavailable()
        }

        async fn delete(&self, _id: TaskId) -> StoreResult<Option<Task>> {
            unavailable()
        }

        async fn health_check(&self) -> StoreResult<()> {
            unavailable()
        }
    }
}
