//! Common test utilities for in-process API testing.
//!
//! This module provides a test fixture that builds the real router around a
//! fresh ticket registry, so requests can be driven without binding a port.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use counterline_core::{Config, TicketRegistry};
use counterline_server::{api::create_router, state::AppState};

/// Test fixture wrapping a router and the registry behind it.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_ticket_creation() {
///     let fixture = TestFixture::new();
///     let response = fixture.post("/api/tickets").await;
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Registry shared with the router, for direct setup and inspection
    pub registry: Arc<TicketRegistry>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when empty or not JSON)
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(config: Config) -> Self {
        let registry = Arc::new(TicketRegistry::new());
        let state = Arc::new(AppState::new(config, Arc::clone(&registry)));
        let router = create_router(state);

        Self { router, registry }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request with an empty body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    /// Create `count` tickets through the API.
    pub async fn create_tickets(&self, count: usize) {
        for _ in 0..count {
            let response = self.post("/api/tickets").await;
            assert_eq!(response.status, StatusCode::CREATED);
        }
    }

    /// Send a request to the test server.
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }
}

/// Ticket numbers from a JSON array of tickets.
pub fn numbers(body: &Value) -> Vec<u64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|t| t["number"].as_u64().expect("ticket number"))
        .collect()
}
