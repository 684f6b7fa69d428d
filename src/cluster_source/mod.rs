// Cluster data source: the read-only list operations the snapshot engine consumes

mod convert;
mod kube_source;

pub use convert::{node_record, pod_record, workload_from_deployment, workload_from_replica_set};
pub use kube_source::KubeSource;

use crate::models::{NodeRecord, PodRecord, WorkloadKind, WorkloadRecord};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// A list call against the control plane failed (transport, auth, missing resource type).
/// Finer causes are carried as text only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cluster unavailable during {operation}: {cause}")]
pub struct ClusterUnavailable {
    pub operation: String,
    pub cause: String,
}

impl ClusterUnavailable {
    pub fn new(operation: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }
}

/// Which pods a `list_pods` call should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodSelector {
    /// Label selector within one namespace.
    Label { namespace: String, selector: String },
    /// Pods bound to the named node, across all namespaces.
    Node(String),
}

impl PodSelector {
    /// `<label_key>=<workload name>` in the workload's namespace.
    ///
    /// This is a naming convention, not an ownership reference: pods of a workload that
    /// labels them differently are not found.
    pub fn for_workload(workload: &WorkloadRecord, label_key: &str) -> Self {
        PodSelector::Label {
            namespace: workload.namespace.clone(),
            selector: format!("{}={}", label_key, workload.name),
        }
    }

    pub fn on_node(node: impl Into<String>) -> Self {
        PodSelector::Node(node.into())
    }
}

/// Field selector matching pods bound to `node`.
pub fn node_field_selector(node: &str) -> String {
    format!("spec.nodeName={}", node)
}

impl fmt::Display for PodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PodSelector::Label {
                namespace,
                selector,
            } => write!(f, "{}/{}", namespace, selector),
            PodSelector::Node(node) => f.write_str(&node_field_selector(node)),
        }
    }
}

/// Point-in-time reads against the control plane. Implementations own retry policy;
/// the engine never retries.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// Workloads of `kind` across all namespaces, `scheduled_nodes` left empty.
    async fn list_workloads(
        &self,
        kind: WorkloadKind,
    ) -> Result<Vec<WorkloadRecord>, ClusterUnavailable>;

    async fn list_pods(&self, selector: &PodSelector) -> Result<Vec<PodRecord>, ClusterUnavailable>;

    async fn list_nodes(&self) -> Result<Vec<NodeRecord>, ClusterUnavailable>;
}
