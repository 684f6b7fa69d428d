// Snapshot aggregator: one exclusive fetch-and-compute pass over workloads, pods and nodes.

use super::{occupancy, replica};
use crate::cluster_source::{ClusterSource, ClusterUnavailable, PodSelector};
use crate::models::{NodeReport, Snapshot, WorkloadKind, WorkloadReport};
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, instrument};

pub const DEFAULT_WORKLOAD_LABEL_KEY: &str = "app";
pub const DEFAULT_SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Label key used to match pods to a workload by name (`<key>=<workload name>`).
    pub workload_label_key: String,
    /// Upper bound for one `build_snapshot` call, lock wait included.
    pub snapshot_timeout: Duration,
    /// Max in-flight pod list calls within a pass.
    pub fetch_concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            workload_label_key: DEFAULT_WORKLOAD_LABEL_KEY.to_string(),
            snapshot_timeout: DEFAULT_SNAPSHOT_TIMEOUT,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

/// Builds snapshots on demand. At most one pass runs at a time per aggregator; waiting
/// callers are served in arrival order and each gets its own full fetch.
pub struct SnapshotAggregator {
    source: Arc<dyn ClusterSource>,
    config: AggregatorConfig,
    pass_lock: Mutex<()>,
}

impl SnapshotAggregator {
    pub fn new(source: Arc<dyn ClusterSource>, config: AggregatorConfig) -> Self {
        Self {
            source,
            config,
            pass_lock: Mutex::new(()),
        }
    }

    /// Runs one pass bounded by the configured snapshot timeout. A timeout past the
    /// clock's range means no deadline.
    pub async fn build_snapshot(&self) -> Result<Snapshot, ClusterUnavailable> {
        match Instant::now().checked_add(self.config.snapshot_timeout) {
            Some(deadline) => self.build_snapshot_until(deadline).await,
            None => self.run_pass().await,
        }
    }

    /// Runs one pass that must finish by `deadline`. On expiry the pass is dropped
    /// mid-flight and nothing partial is returned. Dropping the returned future has the
    /// same effect and releases the pass lock.
    pub async fn build_snapshot_until(
        &self,
        deadline: Instant,
    ) -> Result<Snapshot, ClusterUnavailable> {
        match tokio::time::timeout_at(deadline, self.run_pass()).await {
            Ok(result) => result,
            Err(_) => Err(ClusterUnavailable::new(
                "snapshot",
                "deadline exceeded before the pass completed",
            )),
        }
    }

    #[instrument(skip(self), fields(operation = "build_snapshot"))]
    async fn run_pass(&self) -> Result<Snapshot, ClusterUnavailable> {
        let _pass = self.pass_lock.lock().await;
        let started = Instant::now();
        let now = Utc::now();

        let deployments = self.workload_reports(WorkloadKind::Deployment).await?;
        let replica_sets = self.workload_reports(WorkloadKind::ReplicaSet).await?;
        let nodes = self.node_reports(now).await?;

        info!(
            deployments = deployments.len(),
            replica_sets = replica_sets.len(),
            nodes = nodes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot built"
        );
        Ok(Snapshot {
            deployments,
            replica_sets,
            nodes,
        })
    }

    async fn workload_reports(
        &self,
        kind: WorkloadKind,
    ) -> Result<Vec<WorkloadReport>, ClusterUnavailable> {
        let workloads = self.source.list_workloads(kind).await?;
        debug!(%kind, count = workloads.len(), "evaluating workloads");
        let label_key = &self.config.workload_label_key;

        stream::iter(workloads)
            .map(|mut workload| {
                let source = Arc::clone(&self.source);
                let selector = PodSelector::for_workload(&workload, label_key);
                async move {
                    let pods = source.list_pods(&selector).await?;
                    workload.scheduled_nodes =
                        pods.iter().map(|p| p.node_name.clone()).collect();
                    let health = replica::evaluate(&workload, &pods);
                    Ok::<_, ClusterUnavailable>(WorkloadReport { workload, health })
                }
            })
            .buffered(self.config.fetch_concurrency.max(1))
            .try_collect()
            .await
    }

    async fn node_reports(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<NodeReport>, ClusterUnavailable> {
        let nodes = self.source.list_nodes().await?;
        debug!(count = nodes.len(), "reporting nodes");

        stream::iter(nodes)
            .map(|node| {
                let source = Arc::clone(&self.source);
                async move {
                    let pods = source.list_pods(&PodSelector::on_node(&node.name)).await?;
                    Ok::<_, ClusterUnavailable>(occupancy::report(&node.name, &pods, now))
                }
            })
            .buffered(self.config.fetch_concurrency.max(1))
            .try_collect()
            .await
    }
}
