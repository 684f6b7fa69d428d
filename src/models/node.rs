// Node occupancy report models

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Closed classification of a pod condition type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionKind {
    Ready,
    NotReady,
    Initialized,
    NotInitialized,
    /// Any other condition type, carried through unchanged.
    Other(String),
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::Ready => f.write_str("Ready"),
            ConditionKind::NotReady => f.write_str("Not Ready"),
            ConditionKind::Initialized => f.write_str("Initialized"),
            ConditionKind::NotInitialized => f.write_str("Not Initialized"),
            ConditionKind::Other(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for ConditionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A pod condition normalized for display.
///
/// When the cluster reports no probe time, `last_probe_time` is the wall clock of the
/// snapshot pass and `probe_time_defaulted` is set. That value is a presentation
/// default, not something the cluster said.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodConditionView {
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    pub status: String,
    pub last_probe_time: DateTime<Utc>,
    pub probe_time_defaulted: bool,
    pub last_transition_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSummary {
    #[serde(rename = "name")]
    pub pod_name: String,
    #[serde(rename = "podConditions")]
    pub conditions: Vec<PodConditionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReport {
    #[serde(rename = "name")]
    pub node_name: String,
    /// Every pod bound to the node, including ones left out of `pod_summaries`.
    #[serde(rename = "numberOfPods")]
    pub pod_count: usize,
    #[serde(rename = "pods")]
    pub pod_summaries: Vec<PodSummary>,
}
