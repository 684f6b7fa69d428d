// Snapshot: the one artifact a snapshot pass hands back

use serde::Serialize;

use super::{NodeReport, WorkloadReport};

/// Deployments, replica sets and nodes from exactly one fetch cycle, in the order
/// the cluster returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub deployments: Vec<WorkloadReport>,
    pub replica_sets: Vec<WorkloadReport>,
    pub nodes: Vec<NodeReport>,
}
