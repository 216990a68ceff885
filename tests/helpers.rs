#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use stock_broker::api::create_router;
use stock_broker::error::RepositoryError;
use stock_broker::models::*;
use stock_broker::repositories::*;
use stock_broker::services::StockService;
use stock_broker::AppState;
use tower::ServiceExt;
use uuid::Uuid;

/// Service wired to a fresh in-memory store
pub fn memory_service() -> (StockService, Arc<InMemoryStockRepository>) {
    let store = Arc::new(InMemoryStockRepository::new());
    (StockService::new(store.clone()), store)
}

/// Router wired to a fresh in-memory store
pub fn memory_app() -> Router {
    create_router(AppState::in_memory())
}

/// Store whose every call fails as if the pool were exhausted
pub struct FailingStockStore;

fn pool_timed_out() -> RepositoryError {
    RepositoryError::Query(sqlx::Error::PoolTimedOut)
}

#[async_trait::async_trait]
impl StockStore for FailingStockStore {
    async fn save(&self, _stock: &Stock) -> Result<Stock, RepositoryError> {
        Err(pool_timed_out())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Stock>, RepositoryError> {
        Err(pool_timed_out())
    }

    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError> {
        Err(pool_timed_out())
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<bool, RepositoryError> {
        Err(pool_timed_out())
    }
}

/// Service over a store that always fails
pub fn failing_service() -> StockService {
    StockService::new(Arc::new(FailingStockStore))
}

/// Router over a store that always fails
pub fn failing_app() -> Router {
    create_router(AppState::new(Arc::new(FailingStockStore)))
}

/// Send a raw body with a JSON content type
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    into_test_response(app, request).await
}

/// PostgreSQL-backed store for `#[sqlx::test]` tests
pub struct TestDatabase {
    pub pool: PgPool,
    pub stock_repo: Arc<StockRepository>,
}

impl TestDatabase {
    /// Create TestDatabase from an existing pool (useful with sqlx::test)
    pub async fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: pool.clone(),
            stock_repo: Arc::new(StockRepository::new(pool)),
        }
    }

    /// Service over this database
    pub fn service(&self) -> StockService {
        StockService::new(self.stock_repo.clone())
    }

    /// Clean up all test data
    pub async fn cleanup(&self) {
        sqlx::query("TRUNCATE TABLE stock")
            .execute(&self.pool)
            .await
            .expect("Failed to cleanup test data");
    }
}

pub fn apple() -> StockPayload {
    StockPayload::new("APL0", "Apple Inc.", 150.25)
}

pub fn banco_do_brasil() -> StockPayload {
    StockPayload::new("BBR4", "Banco do Brasil", 77.29)
}

/// Assert that a stock carries exactly the payload's fields
pub fn assert_matches_payload(stock: &Stock, payload: &StockPayload) {
    assert_eq!(Some(&stock.symbol), payload.symbol.as_ref());
    assert_eq!(Some(&stock.company_name), payload.company_name.as_ref());
    assert_eq!(Some(stock.price()), payload.price);
}

/// Response pieces the API tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `message` field of an error body
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// Send one request through the router
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    into_test_response(app, request).await
}

async fn into_test_response(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router should not fail");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
