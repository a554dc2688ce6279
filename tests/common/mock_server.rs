//! Mock matching service built on wiremock.

use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const MATCH_PATH: &str = "/api/match/pigment-to-orders";
pub const PIGMENTS_PATH: &str = "/api/database/pigments";
pub const ORDERS_PATH: &str = "/api/database/orders";

/// Wrapper around wiremock MockServer speaking the matching service API
pub struct MockMatcher {
    pub server: MockServer,
}

impl MockMatcher {
    /// Start a new mock matching service
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure the client with
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Answer match requests for one pigment with the given bundle
    pub async fn mock_match(&self, pigment_id: &str, bundle: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(MATCH_PATH))
            .and(body_partial_json(serde_json::json!({ "pigmentId": pigment_id })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(bundle)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    /// Answer match requests for a pigment the service does not know
    pub async fn mock_unknown_pigment(&self, pigment_id: &str) {
        Mock::given(method("POST"))
            .and(path(MATCH_PATH))
            .and(body_partial_json(serde_json::json!({ "pigmentId": pigment_id })))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false,
                "message": "Pigment not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve one database endpoint with the `{success, data, count}` envelope
    pub async fn mock_database(&self, endpoint: &str, data: serde_json::Value) {
        let count = data.as_array().map(|a| a.len()).unwrap_or(0);
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": data,
                "count": count
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve the pigment and order databases
    pub async fn mock_databases(&self, pigments: serde_json::Value, orders: serde_json::Value) {
        self.mock_database(PIGMENTS_PATH, pigments).await;
        self.mock_database(ORDERS_PATH, orders).await;
    }

    /// Mock an endpoint that returns a raw error body
    pub async fn mock_error(&self, http_method: &str, endpoint: &str, status: u16, body: &str) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }
}
