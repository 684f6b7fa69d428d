// Domain models: workloads, pods, nodes, snapshots, catalog entries

mod cluster;
mod node;
mod pod;
mod snapshot;
mod workload;

pub use cluster::Cluster;
pub use node::{ConditionKind, NodeReport, PodConditionView, PodSummary};
pub use pod::{
    ConditionRecord, ContainerRecord, NodeRecord, PodRecord, ProbeRecord, is_bound_node,
};
pub use snapshot::Snapshot;
pub use workload::{
    ColocationRisk, ProbeWarning, RedundancyLevel, ReplicaHealth, Severity, WorkloadKind,
    WorkloadRecord, WorkloadReport,
};
