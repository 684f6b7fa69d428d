// Shared test helpers: an in-memory cluster with failure and latency injection

#![allow(dead_code)]

use async_trait::async_trait;
use clusterviz::cluster_source::{ClusterSource, ClusterUnavailable, PodSelector};
use clusterviz::models::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Which list call the fake should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailOn {
    Deployments,
    ReplicaSets,
    Nodes,
    /// Any pod listing whose selector renders to this string.
    Pods(String),
}

#[derive(Default)]
pub struct FakeCluster {
    deployments: Vec<WorkloadRecord>,
    replica_sets: Vec<WorkloadRecord>,
    nodes: Vec<NodeRecord>,
    /// (namespace, app label, pod)
    pods: Vec<(String, String, PodRecord)>,
    fail_on: Mutex<Option<FailOn>>,
    delay_ms: AtomicU64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deployment(mut self, namespace: &str, name: &str, replicas: i32) -> Self {
        self.deployments
            .push(WorkloadRecord::new(namespace, name, replicas));
        self
    }

    pub fn replica_set(mut self, namespace: &str, name: &str, replicas: i32) -> Self {
        self.replica_sets
            .push(WorkloadRecord::new(namespace, name, replicas));
        self
    }

    pub fn node(mut self, name: &str) -> Self {
        self.nodes.push(NodeRecord { name: name.into() });
        self
    }

    /// Adds a pod labelled `app=<app>` in `namespace`.
    pub fn pod(mut self, namespace: &str, app: &str, pod: PodRecord) -> Self {
        self.pods.push((namespace.into(), app.into(), pod));
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.set_delay(delay);
        self
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn fail_on(&self, fail: Option<FailOn>) {
        *self.fail_on.lock().unwrap() = fail;
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(
        &self,
        what: FailOn,
        operation: &str,
    ) -> Result<CallGuard<'_>, ClusterUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let guard = CallGuard(&self.in_flight);
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_on.lock().unwrap().as_ref() == Some(&what) {
            return Err(ClusterUnavailable::new(operation, "injected failure"));
        }
        Ok(guard)
    }
}

struct CallGuard<'a>(&'a AtomicUsize);

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ClusterSource for FakeCluster {
    async fn list_workloads(
        &self,
        kind: WorkloadKind,
    ) -> Result<Vec<WorkloadRecord>, ClusterUnavailable> {
        match kind {
            WorkloadKind::Deployment => {
                let _g = self.enter(FailOn::Deployments, "list deployments").await?;
                Ok(self.deployments.clone())
            }
            WorkloadKind::ReplicaSet => {
                let _g = self.enter(FailOn::ReplicaSets, "list replica sets").await?;
                Ok(self.replica_sets.clone())
            }
        }
    }

    async fn list_pods(
        &self,
        selector: &PodSelector,
    ) -> Result<Vec<PodRecord>, ClusterUnavailable> {
        let _g = self
            .enter(FailOn::Pods(selector.to_string()), "list pods")
            .await?;
        let pods = match selector {
            PodSelector::Label {
                namespace,
                selector,
            } => {
                let app = selector.strip_prefix("app=").unwrap_or_default();
                self.pods
                    .iter()
                    .filter(|(ns, label, _)| ns == namespace && label == app)
                    .map(|(_, _, p)| p.clone())
                    .collect()
            }
            PodSelector::Node(node) => self
                .pods
                .iter()
                .filter(|(_, _, p)| &p.node_name == node)
                .map(|(_, _, p)| p.clone())
                .collect(),
        };
        Ok(pods)
    }

    async fn list_nodes(&self) -> Result<Vec<NodeRecord>, ClusterUnavailable> {
        let _g = self.enter(FailOn::Nodes, "list nodes").await?;
        Ok(self.nodes.clone())
    }
}

pub fn pod(name: &str, node: &str) -> PodRecord {
    PodRecord {
        name: name.into(),
        node_name: node.into(),
        containers: vec![],
        conditions: vec![],
    }
}

pub fn probed_pod(
    name: &str,
    node: &str,
    container: &str,
    liveness: i32,
    readiness: i32,
) -> PodRecord {
    PodRecord {
        containers: vec![ContainerRecord {
            name: container.into(),
            liveness_probe: Some(ProbeRecord {
                failure_threshold: liveness,
            }),
            readiness_probe: Some(ProbeRecord {
                failure_threshold: readiness,
            }),
        }],
        ..pod(name, node)
    }
}

pub fn pod_with_condition(name: &str, node: &str, condition_type: &str, status: &str) -> PodRecord {
    PodRecord {
        conditions: vec![ConditionRecord {
            condition_type: condition_type.into(),
            status: status.into(),
            last_probe_time: None,
            last_transition_time: None,
        }],
        ..pod(name, node)
    }
}

/// Small cluster: "api" (1 replica, two pods on n1), "web" (3 replicas over n1..n3),
/// "batch" (0 replicas, no pods), plus a replica set of web.
pub fn sample_cluster() -> FakeCluster {
    FakeCluster::new()
        .deployment("default", "api", 1)
        .deployment("default", "web", 3)
        .deployment("jobs", "batch", 0)
        .replica_set("default", "web-5d8f", 3)
        .node("n1")
        .node("n2")
        .node("n3")
        .pod("default", "api", pod_with_condition("api-a", "n1", "Ready", "False"))
        .pod("default", "api", pod("api-b", "n1"))
        .pod("default", "web", probed_pod("web-a", "n1", "web", 3, 0))
        .pod("default", "web", pod("web-b", "n2"))
        .pod("default", "web", pod("web-c", "n3"))
        .pod("default", "web-5d8f", pod("web-5d8f-x", "n2"))
}
