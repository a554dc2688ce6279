//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use pigment_matrix::assets::AssetLoader;
use pigment_matrix::models::{AnalysisConfig, AppConfig, MatcherConfig};
use pigment_matrix::server::{build_router, create_app_state, AppState};
use pigment_matrix::services::{Catalog, SessionStore};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
}

impl TestApp {
    /// Create a test application talking to the given matching service,
    /// without the minimum analysis delay
    pub fn new(matcher_url: &str) -> Self {
        Self::with_templates(matcher_url, None)
    }

    /// Same as [`TestApp::new`] with an external templates directory
    pub fn with_templates(matcher_url: &str, templates_dir: Option<PathBuf>) -> Self {
        let asset_loader = Arc::new(AssetLoader::new(templates_dir, None));
        let state = create_app_state(asset_loader, Self::config(matcher_url, 0))
            .expect("Failed to create app state");

        let catalog = state.catalog.clone();
        let sessions = state.sessions.clone();
        let router = build_router(state.clone());

        Self {
            router,
            state,
            catalog,
            sessions,
        }
    }

    /// Configuration pointing at `matcher_url`
    pub fn config(matcher_url: &str, min_duration_ms: u64) -> AppConfig {
        AppConfig {
            matcher: MatcherConfig {
                base_url: matcher_url.to_string(),
                timeout_secs: 5,
            },
            analysis: AnalysisConfig {
                min_duration_ms,
                ..AnalysisConfig::default()
            },
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request with custom headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::get(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Run an analysis through the API and return the response
    pub async fn analyze(&self, pigment_id: &str) -> TestResponse {
        let body = serde_json::json!({ "pigmentId": pigment_id }).to_string();
        self.post_json("/api/analysis", &body).await
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
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Value of a response header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
