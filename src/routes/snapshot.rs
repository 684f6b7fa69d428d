// Snapshot handlers: full dashboard view and per-section views.
// Every request runs its own snapshot pass.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::AppState;
use super::error::ApiError;
use crate::models::{
    ColocationRisk, NodeReport, RedundancyLevel, Snapshot, WorkloadReport, is_bound_node,
};

/// One workload as rendered on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadView {
    pub namespace: String,
    pub name: String,
    pub replicas: i32,
    /// Bound node of each matched pod, unbound pods left out.
    pub nodes: Vec<String>,
    pub redundancy: RedundancyLevel,
    pub colocation: ColocationRisk,
    pub probe_warnings: Vec<String>,
    pub node_scheduling: String,
}

impl From<WorkloadReport> for WorkloadView {
    fn from(r: WorkloadReport) -> Self {
        let node_scheduling = r.health.node_scheduling_note(r.workload.declared_replicas);
        Self {
            namespace: r.workload.namespace,
            name: r.workload.name,
            replicas: r.workload.declared_replicas,
            nodes: r
                .workload
                .scheduled_nodes
                .into_iter()
                .filter(|n| is_bound_node(n))
                .collect(),
            redundancy: r.health.redundancy,
            colocation: r.health.colocation,
            probe_warnings: r.health.probe_warnings.into_iter().map(String::from).collect(),
            node_scheduling,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadListResponse {
    pub data: Vec<WorkloadView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodesView {
    pub total_nodes: usize,
    pub node_names: Vec<String>,
    pub nodes: Vec<NodeReport>,
}

impl NodesView {
    fn new(nodes: Vec<NodeReport>) -> Self {
        Self {
            total_nodes: nodes.len(),
            node_names: nodes.iter().map(|n| n.node_name.clone()).collect(),
            nodes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterVizResponse {
    pub deployments: Vec<WorkloadView>,
    pub replica_sets: Vec<WorkloadView>,
    pub nodes: NodesView,
}

impl From<Snapshot> for ClusterVizResponse {
    fn from(s: Snapshot) -> Self {
        Self {
            deployments: s.deployments.into_iter().map(WorkloadView::from).collect(),
            replica_sets: s.replica_sets.into_iter().map(WorkloadView::from).collect(),
            nodes: NodesView::new(s.nodes),
        }
    }
}

/// GET /clusterviz — deployments, replica sets and nodes from one pass.
pub(super) async fn cluster_viz_handler(
    State(state): State<AppState>,
) -> Result<Json<ClusterVizResponse>, ApiError> {
    let snapshot = state.aggregator.build_snapshot().await?;
    Ok(Json(snapshot.into()))
}

/// GET /api/v1/deployments
pub(super) async fn deployments_handler(
    State(state): State<AppState>,
) -> Result<Json<WorkloadListResponse>, ApiError> {
    let snapshot = state.aggregator.build_snapshot().await?;
    Ok(Json(WorkloadListResponse {
        data: snapshot.deployments.into_iter().map(WorkloadView::from).collect(),
    }))
}

/// GET /api/v1/replicasets
pub(super) async fn replica_sets_handler(
    State(state): State<AppState>,
) -> Result<Json<WorkloadListResponse>, ApiError> {
    let snapshot = state.aggregator.build_snapshot().await?;
    Ok(Json(WorkloadListResponse {
        data: snapshot.replica_sets.into_iter().map(WorkloadView::from).collect(),
    }))
}

/// GET /api/v1/nodes
pub(super) async fn nodes_handler(
    State(state): State<AppState>,
) -> Result<Json<NodesView>, ApiError> {
    let snapshot = state.aggregator.build_snapshot().await?;
    Ok(Json(NodesView::new(snapshot.nodes)))
}
