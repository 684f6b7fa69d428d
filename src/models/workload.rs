// Workload (deployment / replica set) models and replica health classification types

use serde::Serialize;
use std::fmt;

/// Which workload collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WorkloadKind {
    Deployment,
    ReplicaSet,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::ReplicaSet => "ReplicaSet",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deployment or replica set as seen by a single snapshot pass.
///
/// `scheduled_nodes` holds the node binding of every pod matched to the workload, in
/// discovery order and with duplicates kept. It only means something relative to the
/// pass that filled it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadRecord {
    pub namespace: String,
    pub name: String,
    pub declared_replicas: i32,
    pub scheduled_nodes: Vec<String>,
}

impl WorkloadRecord {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        declared_replicas: i32,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            declared_replicas,
            scheduled_nodes: Vec::new(),
        }
    }
}

/// INFO / WARNING tag attached to each classification in the rendered notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("INFO"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// Redundancy of a workload, derived from its declared replica count only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RedundancyLevel {
    /// Exactly one replica.
    Single,
    /// Zero or negative replicas.
    Under,
    /// More than one replica.
    Normal,
}

impl RedundancyLevel {
    pub fn severity(&self) -> Severity {
        match self {
            RedundancyLevel::Normal => Severity::Info,
            RedundancyLevel::Single | RedundancyLevel::Under => Severity::Warning,
        }
    }

    pub fn message(&self, declared_replicas: i32) -> String {
        match self {
            RedundancyLevel::Single => {
                "Replica count is 1. Consider increasing it for high availability.".to_string()
            }
            RedundancyLevel::Under => {
                "Replica count is less than 1. Please update the workload.".to_string()
            }
            RedundancyLevel::Normal => format!("Replica count is {}.", declared_replicas),
        }
    }
}

/// How the pods of a workload are spread over nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColocationRisk {
    /// Pods on more than one distinct node.
    Distributed,
    /// Every bound pod on the same node.
    Colocated,
    /// No pod bound to any node.
    Unscheduled,
}

impl ColocationRisk {
    pub fn severity(&self) -> Severity {
        match self {
            ColocationRisk::Distributed => Severity::Info,
            ColocationRisk::Colocated | ColocationRisk::Unscheduled => Severity::Warning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ColocationRisk::Distributed => "Pods are scheduled on different nodes.",
            ColocationRisk::Colocated => "Pods are scheduled on the same node.",
            ColocationRisk::Unscheduled => "No Pods are scheduled.",
        }
    }
}

/// A per-container probe note; serializes as its rendered sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ProbeWarning {
    LivenessThreshold {
        pod: String,
        container: String,
        failure_threshold: i32,
    },
    ReadinessThreshold {
        pod: String,
        container: String,
        failure_threshold: i32,
    },
    /// Readiness probe present with a zero failure threshold. Informational.
    ReadinessPassed { pod: String, container: String },
}

impl fmt::Display for ProbeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeWarning::LivenessThreshold {
                pod,
                container,
                failure_threshold,
            } => write!(
                f,
                "Liveness probe failure threshold for container {} in pod {}: {}",
                container, pod, failure_threshold
            ),
            ProbeWarning::ReadinessThreshold {
                pod,
                container,
                failure_threshold,
            } => write!(
                f,
                "Readiness probe failure threshold for container {} in pod {}: {}",
                container, pod, failure_threshold
            ),
            ProbeWarning::ReadinessPassed { pod, container } => write!(
                f,
                "Readiness probe passed for container {} in pod {}",
                container, pod
            ),
        }
    }
}

impl From<ProbeWarning> for String {
    fn from(w: ProbeWarning) -> Self {
        w.to_string()
    }
}

/// Derived health of one workload. Built once per pass and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaHealth {
    pub redundancy: RedundancyLevel,
    pub colocation: ColocationRisk,
    pub probe_warnings: Vec<ProbeWarning>,
}

impl ReplicaHealth {
    /// One-line note in the dashboard's `[SEVERITY] message` style.
    pub fn node_scheduling_note(&self, declared_replicas: i32) -> String {
        let mut note = format!(
            "[{}] {} [{}] {}",
            self.redundancy.severity(),
            self.redundancy.message(declared_replicas),
            self.colocation.severity(),
            self.colocation.message()
        );
        for w in &self.probe_warnings {
            note.push(' ');
            note.push_str(&w.to_string());
        }
        note
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadReport {
    pub workload: WorkloadRecord,
    pub health: ReplicaHealth,
}
