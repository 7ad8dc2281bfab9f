#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use registry_db::repositories::CustomerRepository;
use registry_db::store::{CustomerStore, InMemoryCustomerStore};
use tower::ServiceExt;

use registry_api::config::{ServerConfig, StorageBackend};
use registry_api::router::build_app_router;
use registry_api::service::CustomerService;
use registry_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
    }
}

/// Build the full application router over the given store, with the same
/// middleware stack production uses.
pub fn build_test_app_with(store: Arc<dyn CustomerStore>) -> Router {
    let state = AppState {
        customers: CustomerService::new(CustomerRepository::new(store)),
    };
    build_app_router(state, &test_config())
}

/// Router over a fresh in-memory store, plus the store for inspection.
pub fn build_test_app() -> (Router, Arc<InMemoryCustomerStore>) {
    let store = Arc::new(InMemoryCustomerStore::new());
    (build_test_app_with(store.clone()), store)
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
