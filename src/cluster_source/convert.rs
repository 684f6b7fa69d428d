// Copy the fields the engine needs out of k8s-openapi objects.

use crate::models::{
    ConditionRecord, ContainerRecord, NodeRecord, PodRecord, ProbeRecord, WorkloadRecord,
};
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::{Container, Node, Pod, PodCondition, Probe};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Replica count the API server assumes when `spec.replicas` is unset.
const DEFAULT_REPLICAS: i32 = 1;

fn identity(meta: &ObjectMeta) -> (String, String) {
    (
        meta.namespace.clone().unwrap_or_default(),
        meta.name.clone().unwrap_or_default(),
    )
}

pub fn workload_from_deployment(d: &Deployment) -> WorkloadRecord {
    let (namespace, name) = identity(&d.metadata);
    let replicas = d
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(DEFAULT_REPLICAS);
    WorkloadRecord::new(namespace, name, replicas)
}

pub fn workload_from_replica_set(rs: &ReplicaSet) -> WorkloadRecord {
    let (namespace, name) = identity(&rs.metadata);
    let replicas = rs
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(DEFAULT_REPLICAS);
    WorkloadRecord::new(namespace, name, replicas)
}

fn probe_record(p: &Probe) -> ProbeRecord {
    ProbeRecord {
        failure_threshold: p.failure_threshold.unwrap_or(0),
    }
}

fn container_record(c: &Container) -> ContainerRecord {
    ContainerRecord {
        name: c.name.clone(),
        liveness_probe: c.liveness_probe.as_ref().map(probe_record),
        readiness_probe: c.readiness_probe.as_ref().map(probe_record),
    }
}

fn condition_record(c: &PodCondition) -> ConditionRecord {
    ConditionRecord {
        condition_type: c.type_.clone(),
        status: c.status.clone(),
        last_probe_time: c.last_probe_time.as_ref().map(|t| t.0),
        last_transition_time: c.last_transition_time.as_ref().map(|t| t.0),
    }
}

pub fn pod_record(p: &Pod) -> PodRecord {
    let spec = p.spec.as_ref();
    PodRecord {
        name: p.metadata.name.clone().unwrap_or_default(),
        node_name: spec.and_then(|s| s.node_name.clone()).unwrap_or_default(),
        containers: spec
            .map(|s| s.containers.iter().map(container_record).collect())
            .unwrap_or_default(),
        conditions: p
            .status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .map(|cs| cs.iter().map(condition_record).collect())
            .unwrap_or_default(),
    }
}

pub fn node_record(n: &Node) -> NodeRecord {
    NodeRecord {
        name: n.metadata.name.clone().unwrap_or_default(),
    }
}
