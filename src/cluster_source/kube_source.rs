// Kubernetes control-plane reads via kube-rs

use super::{ClusterSource, ClusterUnavailable, PodSelector, convert, node_field_selector};
use crate::models::{NodeRecord, PodRecord, WorkloadKind, WorkloadRecord};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::{Node, Pod};
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, instrument};

pub struct KubeSource {
    client: Client,
}

impl KubeSource {
    /// Connects from an explicit kubeconfig, or via in-cluster / `~/.kube/config` inference.
    pub async fn connect(kubeconfig: Option<&str>) -> anyhow::Result<Self> {
        let client = match kubeconfig {
            Some(path) => {
                let kc = Kubeconfig::read_from(path)?;
                let config =
                    Config::from_custom_kubeconfig(kc, &KubeConfigOptions::default()).await?;
                Client::try_from(config)?
            }
            None => Client::try_default().await?,
        };
        Ok(Self::new(client))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterSource for KubeSource {
    #[instrument(skip(self), fields(source = "kube", operation = "list_workloads"))]
    async fn list_workloads(
        &self,
        kind: WorkloadKind,
    ) -> Result<Vec<WorkloadRecord>, ClusterUnavailable> {
        let lp = ListParams::default();
        let workloads: Vec<WorkloadRecord> = match kind {
            WorkloadKind::Deployment => {
                let api: Api<Deployment> = Api::all(self.client.clone());
                api.list(&lp)
                    .await
                    .map_err(|e| ClusterUnavailable::new("list deployments", e))?
                    .items
                    .iter()
                    .map(convert::workload_from_deployment)
                    .collect()
            }
            WorkloadKind::ReplicaSet => {
                let api: Api<ReplicaSet> = Api::all(self.client.clone());
                api.list(&lp)
                    .await
                    .map_err(|e| ClusterUnavailable::new("list replica sets", e))?
                    .items
                    .iter()
                    .map(convert::workload_from_replica_set)
                    .collect()
            }
        };
        debug!(count = workloads.len(), %kind, "listed workloads");
        Ok(workloads)
    }

    #[instrument(skip(self, selector), fields(source = "kube", operation = "list_pods", selector = %selector))]
    async fn list_pods(
        &self,
        selector: &PodSelector,
    ) -> Result<Vec<PodRecord>, ClusterUnavailable> {
        let (api, lp): (Api<Pod>, ListParams) = match selector {
            PodSelector::Label {
                namespace,
                selector,
            } => (
                Api::namespaced(self.client.clone(), namespace),
                ListParams::default().labels(selector),
            ),
            PodSelector::Node(node) => (
                Api::all(self.client.clone()),
                ListParams::default().fields(&node_field_selector(node)),
            ),
        };
        let pods = api
            .list(&lp)
            .await
            .map_err(|e| ClusterUnavailable::new(format!("list pods ({})", selector), e))?;
        Ok(pods.items.iter().map(convert::pod_record).collect())
    }

    #[instrument(skip(self), fields(source = "kube", operation = "list_nodes"))]
    async fn list_nodes(&self) -> Result<Vec<NodeRecord>, ClusterUnavailable> {
        let api: Api<Node> = Api::all(self.client.clone());
        let nodes = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterUnavailable::new("list nodes", e))?;
        Ok(nodes.items.iter().map(convert::node_record).collect())
    }
}
