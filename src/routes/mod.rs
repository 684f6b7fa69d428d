// HTTP routes

mod catalog;
mod error;
mod http;
mod snapshot;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::ClusterCatalog;
use crate::engine::SnapshotAggregator;

pub use snapshot::{ClusterVizResponse, NodesView, WorkloadListResponse, WorkloadView};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<SnapshotAggregator>,
    pub(crate) catalog: Option<Arc<ClusterCatalog>>,
}

pub fn app(aggregator: Arc<SnapshotAggregator>, catalog: Option<Arc<ClusterCatalog>>) -> Router {
    let state = AppState {
        aggregator,
        catalog,
    };
    Router::new()
        .route("/", get(|| async { "clusterviz: cluster health dashboard" })) // GET /
        .route("/health", get(http::health_handler)) // GET /health
        .route("/version", get(http::version_handler)) // GET /version
        .route("/clusterviz", get(snapshot::cluster_viz_handler)) // GET /clusterviz
        .route("/api/v1/deployments", get(snapshot::deployments_handler))
        .route("/api/v1/replicasets", get(snapshot::replica_sets_handler))
        .route("/api/v1/nodes", get(snapshot::nodes_handler))
        .route("/api/v1/clusters", get(catalog::list_clusters_handler))
        .route("/api/v1/clusters/{id}", get(catalog::get_cluster_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
