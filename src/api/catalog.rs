use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use match_insight::Pigment;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::{Catalog, MatchService};

/// Pigments available for analysis
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PigmentListResponse {
    pub status: u16,
    pub count: usize,
    /// When the catalog was last fetched; absent before the first load
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub loaded_at: Option<DateTime<Utc>>,
    #[schema(value_type = Vec<Object>)]
    pub pigments: Vec<Pigment>,
}

/// Result of a catalog reload
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReloadResponse {
    pub status: u16,
    pub pigments: usize,
    pub orders: usize,
    #[schema(value_type = String)]
    pub loaded_at: DateTime<Utc>,
}

/// List pigments
///
/// Returns the pigment database as last fetched from the matching service.
/// The list is empty until the catalog has been loaded.
#[utoipa::path(
    get,
    path = "/api/pigments",
    responses(
        (status = 200, description = "Pigment catalog", body = PigmentListResponse),
    ),
    tag = "Catalog"
)]
pub async fn handle_pigments(State(catalog): State<Arc<Catalog>>) -> Json<PigmentListResponse> {
    let snapshot = catalog.snapshot().await;

    Json(PigmentListResponse {
        status: 200,
        count: snapshot.pigments.len(),
        loaded_at: snapshot.loaded_at,
        pigments: snapshot.pigments,
    })
}

/// Reload the catalog
///
/// Fetches the pigment and order databases and replaces the cached copy.
/// If either fetch fails the previous catalog is kept.
#[utoipa::path(
    post,
    path = "/api/catalog/reload",
    responses(
        (status = 200, description = "Catalog reloaded", body = CatalogReloadResponse),
        (status = 502, description = "Matching service unavailable"),
    ),
    tag = "Catalog"
)]
pub async fn handle_reload(
    State(catalog): State<Arc<Catalog>>,
    State(matcher): State<Arc<dyn MatchService>>,
) -> Result<Json<CatalogReloadResponse>, ApiError> {
    let snapshot = catalog.reload(matcher.as_ref()).await?;

    Ok(Json(CatalogReloadResponse {
        status: 200,
        pigments: snapshot.pigments.len(),
        orders: snapshot.orders.len(),
        loaded_at: snapshot.loaded_at.unwrap_or_else(Utc::now),
    }))
}
