// Pod and node records as handed over by the cluster data source.
// Only the fields the engine reads are copied out of the API objects.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRecord {
    /// 0 when the API object leaves it unset.
    pub failure_threshold: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    pub name: String,
    pub liveness_probe: Option<ProbeRecord>,
    pub readiness_probe: Option<ProbeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    pub condition_type: String,
    pub status: String,
    pub last_probe_time: Option<DateTime<Utc>>,
    pub last_transition_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodRecord {
    pub name: String,
    /// Empty while the pod is not bound to a node.
    pub node_name: String,
    pub containers: Vec<ContainerRecord>,
    pub conditions: Vec<ConditionRecord>,
}

/// A node binding names a node; the empty string means "not bound yet".
pub fn is_bound_node(node_name: &str) -> bool {
    !node_name.is_empty()
}

impl PodRecord {
    pub fn is_bound(&self) -> bool {
        is_bound_node(&self.node_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub name: String,
}
