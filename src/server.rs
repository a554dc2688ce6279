//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Path, State},
    http::{header::CACHE_CONTROL, HeaderMap, HeaderValue},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{
    AnalysisService, Catalog, HttpMatchService, MatchService, PageRenderer, SessionStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub matcher: Arc<dyn MatchService>,
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<SessionStore>,
    pub analysis: Arc<AnalysisService>,
    pub pages: Arc<PageRenderer>,
}

/// Create application state talking to the configured matching service.
pub fn create_app_state(asset_loader: Arc<AssetLoader>, config: AppConfig) -> anyhow::Result<AppState> {
    let matcher = HttpMatchService::from_config(&config.matcher)
        .map_err(|e| anyhow::anyhow!("Failed to create matcher client: {e}"))?;
    tracing::debug!(url = %matcher.base_url(), "Matcher client ready");

    Ok(create_app_state_with(asset_loader, config, Arc::new(matcher)))
}

/// Create application state around any [`MatchService`].
pub fn create_app_state_with(
    asset_loader: Arc<AssetLoader>,
    config: AppConfig,
    matcher: Arc<dyn MatchService>,
) -> AppState {
    let catalog = Arc::new(Catalog::new());
    let sessions = Arc::new(SessionStore::new());
    let analysis = Arc::new(AnalysisService::new(
        matcher.clone(),
        catalog.clone(),
        sessions.clone(),
        &config.analysis,
    ));
    let pages = Arc::new(PageRenderer::new(asset_loader));

    AppState {
        config: Arc::new(config),
        matcher,
        catalog,
        sessions,
        analysis,
        pages,
    }
}

/// Load the catalog once at startup; a failure only logs.
pub async fn warm_catalog(state: &AppState) {
    if let Err(e) = state.catalog.reload(state.matcher.as_ref()).await {
        tracing::warn!(error = %e, "Catalog not loaded at startup");
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Responses carry `Cache-Control: no-store`; every analysis replaces the
/// previous one.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pigments", get(handle_pigments))
        .route("/api/catalog/reload", post(handle_reload))
        .route("/api/analysis", post(handle_analyze))
        .route("/api/analysis/latest", get(handle_latest))
        .route("/dashboard", get(handle_latest_dashboard))
        .route("/dashboard/:pigment_id", get(handle_dashboard))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_pigments(State(state): State<AppState>) -> Json<api::PigmentListResponse> {
    api::handle_pigments(State(state.catalog)).await
}

async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<api::CatalogReloadResponse>, ApiError> {
    api::handle_reload(State(state.catalog), State(state.matcher)).await
}

async fn handle_analyze(
    State(state): State<AppState>,
    request: Json<api::AnalysisRequest>,
) -> Result<Response, ApiError> {
    api::handle_analyze(State(state.analysis), request).await
}

async fn handle_latest(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    api::handle_latest(State(state.sessions), headers).await
}

async fn handle_dashboard(State(state): State<AppState>, path: Path<String>) -> Response {
    api::handle_dashboard(State(state.analysis), State(state.pages), path).await
}

async fn handle_latest_dashboard(State(state): State<AppState>) -> Response {
    api::handle_latest_dashboard(State(state.sessions), State(state.pages)).await
}
