use axum::{
    extract::State,
    http::{
        header::{ETAG, IF_NONE_MATCH},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use match_insight::DashboardView;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::AnalysisSession;
use crate::services::{AnalysisService, SessionStore};

/// Request body for an analysis
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Pigment to match against the order database
    #[serde(default)]
    pub pigment_id: Option<String>,
}

/// An assembled dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub status: u16,
    pub pigment_id: String,
    /// SHA-256 of the serialized view; also sent as `ETag`
    pub fingerprint: String,
    #[schema(value_type = String)]
    pub generated_at: DateTime<Utc>,
    /// Tabs, cards, legends and production panel, ready to display
    #[schema(value_type = Object)]
    pub view: DashboardView,
}

impl AnalysisResponse {
    fn from_session(session: &AnalysisSession) -> Self {
        Self {
            status: 200,
            pigment_id: session.pigment_id.clone(),
            fingerprint: session.fingerprint.clone(),
            generated_at: session.generated_at,
            view: session.view.clone(),
        }
    }
}

fn session_response(session: &AnalysisSession) -> Response {
    let mut response = Json(AnalysisResponse::from_session(session)).into_response();
    if let Ok(etag) = HeaderValue::from_str(&session.etag()) {
        response.headers_mut().insert(ETAG, etag);
    }
    response
}

/// Analyze a pigment
///
/// Asks the matching service for every order's scores against the pigment
/// and assembles the dashboard. The result replaces the latest session.
/// Takes at least the configured minimum duration.
#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Dashboard assembled", body = AnalysisResponse),
        (status = 400, description = "Missing pigmentId"),
        (status = 404, description = "Pigment not found"),
        (status = 502, description = "Matching service failed or sent a malformed bundle"),
    ),
    tag = "Analysis"
)]
pub async fn handle_analyze(
    State(analysis): State<Arc<AnalysisService>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, ApiError> {
    let pigment_id = request
        .pigment_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::InvalidRequest("pigmentId is required"))?;

    let session = analysis.analyze(pigment_id).await?;
    Ok(session_response(&session))
}

/// Latest analysis
///
/// Returns the most recent dashboard. Honors `If-None-Match` with the
/// fingerprint from a previous response.
#[utoipa::path(
    get,
    path = "/api/analysis/latest",
    responses(
        (status = 200, description = "Latest dashboard", body = AnalysisResponse),
        (status = 304, description = "Unchanged since the given ETag"),
        (status = 404, description = "No analysis has been run yet"),
    ),
    params(
        ("If-None-Match" = Option<String>, Header, description = "ETag of a previously fetched dashboard"),
    ),
    tag = "Analysis"
)]
pub async fn handle_latest(
    State(sessions): State<Arc<SessionStore>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let session = sessions.latest().await.ok_or(ApiError::NoSession)?;

    let unchanged = headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|tag| tag.trim() == session.etag());
    if unchanged {
        tracing::debug!(pigment = %session.pigment_id, "Latest analysis unchanged");
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok(session_response(&session))
}
