//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use gatekit::config::AppConfig;
use gatekit::security::CsrfSigner;
use gatekit::server::{build_router, create_app_state};

/// Secret used by every test app; tests never read process environment.
pub const TEST_SECRET: &str = "gatekit-test-secret";

/// Test application with router and direct access to the signer
pub struct TestApp {
    router: axum::Router,
    pub signer: Arc<CsrfSigner>,
}

impl TestApp {
    /// Create a new test application with a fixed secret and default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom config (e.g. short token TTL)
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(Arc::new(config), TEST_SECRET);

        // Keep a reference for test assertions
        let signer = state.signer.clone();

        // Build router using the shared server module (same as production)
        let router = build_router(state);

        Self { router, signer }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            Request::post(path)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with no body
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Issue a token through the API and return it
    pub async fn issue_token(&self) -> String {
        let response = self.get("/api/csrf/token").await;
        assert_eq!(response.status, StatusCode::OK);

        let json: serde_json::Value = response.json();
        json["token"].as_str().unwrap().to_string()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured response for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON body")
    }

    /// Get the body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
