// Replica health: redundancy, node colocation and probe notes for one workload.
// Pure functions; no I/O.

use crate::models::{
    ColocationRisk, PodRecord, ProbeWarning, RedundancyLevel, ReplicaHealth, WorkloadRecord,
    is_bound_node,
};
use std::collections::HashSet;

pub fn redundancy_level(declared_replicas: i32) -> RedundancyLevel {
    if declared_replicas == 1 {
        RedundancyLevel::Single
    } else if declared_replicas < 1 {
        RedundancyLevel::Under
    } else {
        RedundancyLevel::Normal
    }
}

/// Classifies by the number of distinct non-empty node names. An empty name is a pod
/// that has not been bound yet, not a node.
pub fn colocation_risk<S: AsRef<str>>(scheduled_nodes: &[S]) -> ColocationRisk {
    let distinct: HashSet<&str> = scheduled_nodes
        .iter()
        .map(AsRef::as_ref)
        .filter(|n| is_bound_node(n))
        .collect();
    match distinct.len() {
        0 => ColocationRisk::Unscheduled,
        1 => ColocationRisk::Colocated,
        _ => ColocationRisk::Distributed,
    }
}

/// Pod order, then container declaration order.
pub fn probe_warnings(pods: &[PodRecord]) -> Vec<ProbeWarning> {
    let mut out = Vec::new();
    for pod in pods {
        for c in &pod.containers {
            if let Some(liveness) = &c.liveness_probe
                && liveness.failure_threshold != 0
            {
                out.push(ProbeWarning::LivenessThreshold {
                    pod: pod.name.clone(),
                    container: c.name.clone(),
                    failure_threshold: liveness.failure_threshold,
                });
            }
            if let Some(readiness) = &c.readiness_probe {
                if readiness.failure_threshold != 0 {
                    out.push(ProbeWarning::ReadinessThreshold {
                        pod: pod.name.clone(),
                        container: c.name.clone(),
                        failure_threshold: readiness.failure_threshold,
                    });
                } else {
                    out.push(ProbeWarning::ReadinessPassed {
                        pod: pod.name.clone(),
                        container: c.name.clone(),
                    });
                }
            }
        }
    }
    out
}

/// `pods` are the pods matched to `workload`; a workload with none is `Unscheduled`
/// with no probe notes.
pub fn evaluate(workload: &WorkloadRecord, pods: &[PodRecord]) -> ReplicaHealth {
    ReplicaHealth {
        redundancy: redundancy_level(workload.declared_replicas),
        colocation: colocation_risk(&workload.scheduled_nodes),
        probe_warnings: probe_warnings(pods),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerRecord, ProbeRecord};

    fn pod(name: &str, node: &str, containers: Vec<ContainerRecord>) -> PodRecord {
        PodRecord {
            name: name.into(),
            node_name: node.into(),
            containers,
            conditions: vec![],
        }
    }

    fn container(name: &str, liveness: Option<i32>, readiness: Option<i32>) -> ContainerRecord {
        ContainerRecord {
            name: name.into(),
            liveness_probe: liveness.map(|t| ProbeRecord {
                failure_threshold: t,
            }),
            readiness_probe: readiness.map(|t| ProbeRecord {
                failure_threshold: t,
            }),
        }
    }

    fn workload(replicas: i32, nodes: &[&str]) -> WorkloadRecord {
        let mut w = WorkloadRecord::new("default", "api", replicas);
        w.scheduled_nodes = nodes.iter().map(|n| n.to_string()).collect();
        w
    }

    #[test]
    fn redundancy_boundaries_are_exact() {
        for r in [i32::MIN, -5, -1, 0] {
            assert_eq!(redundancy_level(r), RedundancyLevel::Under, "r = {}", r);
        }
        assert_eq!(redundancy_level(1), RedundancyLevel::Single);
        for r in [2, 3, 100, i32::MAX] {
            assert_eq!(redundancy_level(r), RedundancyLevel::Normal, "r = {}", r);
        }
    }

    #[test]
    fn colocation_counts_distinct_non_empty_names() {
        let empty: [&str; 0] = [];
        assert_eq!(colocation_risk(&empty), ColocationRisk::Unscheduled);
        assert_eq!(colocation_risk(&["", ""]), ColocationRisk::Unscheduled);
        assert_eq!(colocation_risk(&["n1"]), ColocationRisk::Colocated);
        assert_eq!(colocation_risk(&["n1", "n1", ""]), ColocationRisk::Colocated);
        assert_eq!(colocation_risk(&["n2", "n1"]), ColocationRisk::Distributed);
        assert_eq!(
            colocation_risk(&["n1", "", "n2", "n1"]),
            ColocationRisk::Distributed
        );
    }

    #[test]
    fn single_replica_on_one_node() {
        let w = workload(1, &["n1", "n1"]);
        let pods = vec![pod("api-a", "n1", vec![]), pod("api-b", "n1", vec![])];
        let h = evaluate(&w, &pods);
        assert_eq!(h.redundancy, RedundancyLevel::Single);
        assert_eq!(h.colocation, ColocationRisk::Colocated);
    }

    #[test]
    fn three_replicas_spread_over_three_nodes() {
        let h = evaluate(&workload(3, &["n1", "n2", "n3"]), &[]);
        assert_eq!(h.redundancy, RedundancyLevel::Normal);
        assert_eq!(h.colocation, ColocationRisk::Distributed);
    }

    #[test]
    fn zero_replicas_without_pods() {
        let h = evaluate(&workload(0, &[]), &[]);
        assert_eq!(h.redundancy, RedundancyLevel::Under);
        assert_eq!(h.colocation, ColocationRisk::Unscheduled);
        assert!(h.probe_warnings.is_empty());
    }

    #[test]
    fn probe_warnings_follow_pod_then_container_order() {
        let pods = vec![
            pod(
                "p1",
                "n1",
                vec![
                    container("web", Some(3), Some(0)),
                    container("proxy", Some(0), Some(5)),
                ],
            ),
            pod("p2", "n2", vec![container("web", None, None)]),
            pod("p3", "n2", vec![container("web", Some(1), None)]),
        ];
        let got: Vec<String> = probe_warnings(&pods).iter().map(|w| w.to_string()).collect();
        assert_eq!(
            got,
            vec![
                "Liveness probe failure threshold for container web in pod p1: 3",
                "Readiness probe passed for container web in pod p1",
                "Readiness probe failure threshold for container proxy in pod p1: 5",
                "Liveness probe failure threshold for container web in pod p3: 1",
            ]
        );
    }

    #[test]
    fn zero_liveness_threshold_is_silent() {
        let pods = vec![pod("p1", "n1", vec![container("web", Some(0), None)])];
        assert!(probe_warnings(&pods).is_empty());
    }
}
