// Node occupancy: pods bound to a node and their normalized conditions.

use crate::models::{
    ConditionKind, ConditionRecord, NodeReport, PodConditionView, PodRecord, PodSummary,
};
use chrono::{DateTime, Utc};

const POD_READY: &str = "Ready";
const POD_INITIALIZED: &str = "Initialized";
const CONDITION_TRUE: &str = "True";

/// Total mapping from a raw condition type/status to `ConditionKind`. Any status other
/// than "True" selects the negative variant.
pub fn classify_condition(condition_type: &str, status: &str) -> ConditionKind {
    let is_true = status == CONDITION_TRUE;
    match condition_type {
        POD_READY if is_true => ConditionKind::Ready,
        POD_READY => ConditionKind::NotReady,
        POD_INITIALIZED if is_true => ConditionKind::Initialized,
        POD_INITIALIZED => ConditionKind::NotInitialized,
        other => ConditionKind::Other(other.to_string()),
    }
}

/// A missing probe time becomes `now` and is flagged as defaulted.
pub fn condition_view(c: &ConditionRecord, now: DateTime<Utc>) -> PodConditionView {
    PodConditionView {
        kind: classify_condition(&c.condition_type, &c.status),
        status: c.status.clone(),
        last_probe_time: c.last_probe_time.unwrap_or(now),
        probe_time_defaulted: c.last_probe_time.is_none(),
        last_transition_time: c.last_transition_time,
    }
}

/// `pods` must already be filtered to those bound to `node`. Pods reporting no
/// conditions are counted but get no summary entry.
pub fn report(node: &str, pods: &[PodRecord], now: DateTime<Utc>) -> NodeReport {
    let pod_summaries = pods
        .iter()
        .filter(|p| !p.conditions.is_empty())
        .map(|p| PodSummary {
            pod_name: p.name.clone(),
            conditions: p.conditions.iter().map(|c| condition_view(c, now)).collect(),
        })
        .collect();
    NodeReport {
        node_name: node.to_string(),
        pod_count: pods.len(),
        pod_summaries,
    }
}
