//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert the response carries every security header with its exact value
pub fn assert_security_headers(response: &TestResponse) {
    for (name, expected) in &gatekit::security::SECURITY_HEADERS {
        assert_eq!(
            response.header(name.as_str()),
            Some(*expected),
            "Missing or wrong {name} header"
        );
    }
}
