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

/// Assert JSON error body with the given status and message fragment
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, fragment: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    let error = json["error"].as_str().unwrap_or_default();
    assert!(
        error.contains(fragment),
        "Expected error containing {fragment:?}, got {error:?}"
    );
}

/// Assert response is an HTML page
pub fn assert_html(response: &TestResponse) {
    let content_type = response
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("text/html"),
        "Expected text/html, got {content_type:?}"
    );
    assert!(response.text().starts_with("<!DOCTYPE html>"));
}
