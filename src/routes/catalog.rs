// Cluster catalog handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use super::AppState;
use super::error::ApiError;
use crate::catalog::ClusterCatalog;
use crate::models::Cluster;

fn catalog(state: &AppState) -> Result<&Arc<ClusterCatalog>, ApiError> {
    state.catalog.as_ref().ok_or(ApiError::CatalogDisabled)
}

/// GET /api/v1/clusters
pub(super) async fn list_clusters_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Cluster>>, ApiError> {
    let clusters = catalog(&state)?
        .list_clusters()
        .await
        .map_err(ApiError::catalog)?;
    Ok(Json(clusters))
}

/// GET /api/v1/clusters/{id}
pub(super) async fn get_cluster_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Cluster>, ApiError> {
    catalog(&state)?
        .get_cluster(id)
        .await
        .map_err(ApiError::catalog)?
        .map(Json)
        .ok_or(ApiError::ClusterNotFound(id))
}
