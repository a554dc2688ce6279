use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{AnalysisService, PageRenderer, SessionStore};

/// Turn a failed page request into a notice page with the error's status.
fn notice_response(pages: &PageRenderer, error: ApiError) -> Response {
    let status = error.status_code();
    let title = match error {
        ApiError::NoSession => "No analysis yet",
        ApiError::PigmentNotFound(_) => "Unknown pigment",
        _ => "Analysis failed",
    };
    (status, Html(pages.render_notice(title, &error.to_string()))).into_response()
}

async fn render_fresh(
    analysis: &AnalysisService,
    pages: &PageRenderer,
    pigment_id: &str,
) -> Result<String, ApiError> {
    let session = analysis.analyze(pigment_id).await?;
    Ok(pages.render_dashboard(&session)?)
}

/// Dashboard page for a pigment
///
/// Runs a fresh analysis and renders it as HTML. Failures are shown as a
/// notice page instead of the JSON error body.
#[utoipa::path(
    get,
    path = "/dashboard/{pigment_id}",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html"),
        (status = 404, description = "Pigment not found", content_type = "text/html"),
        (status = 502, description = "Matching service failed", content_type = "text/html"),
    ),
    params(
        ("pigment_id" = String, Path, description = "Pigment identifier, e.g. 'PIG-0001'"),
    ),
    tag = "Dashboard"
)]
pub async fn handle_dashboard(
    State(analysis): State<Arc<AnalysisService>>,
    State(pages): State<Arc<PageRenderer>>,
    Path(pigment_id): Path<String>,
) -> Response {
    match render_fresh(&analysis, &pages, &pigment_id).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => notice_response(&pages, e),
    }
}

/// Latest dashboard page
///
/// Renders the most recent analysis without contacting the matching service.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html"),
        (status = 404, description = "No analysis has been run yet", content_type = "text/html"),
    ),
    tag = "Dashboard"
)]
pub async fn handle_latest_dashboard(
    State(sessions): State<Arc<SessionStore>>,
    State(pages): State<Arc<PageRenderer>>,
) -> Response {
    let rendered = match sessions.latest().await {
        Some(session) => pages.render_dashboard(&session).map_err(ApiError::from),
        None => Err(ApiError::NoSession),
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => notice_response(&pages, e),
    }
}
