use serde::Deserialize;
use std::time::Duration;

use crate::engine::{
    AggregatorConfig, DEFAULT_FETCH_CONCURRENCY, DEFAULT_SNAPSHOT_TIMEOUT,
    DEFAULT_WORKLOAD_LABEL_KEY,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    /// Cluster catalog; the catalog routes answer 503 when absent.
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    /// Explicit kubeconfig path. Unset: in-cluster config, then ~/.kube/config.
    pub kubeconfig: Option<String>,
    #[serde(default = "default_snapshot_timeout_secs")]
    pub snapshot_timeout_secs: u64,
    #[serde(default = "default_workload_label_key")]
    pub workload_label_key: String,
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            snapshot_timeout_secs: default_snapshot_timeout_secs(),
            workload_label_key: default_workload_label_key(),
            fetch_concurrency: default_fetch_concurrency(),
        }
    }
}

/// One hour; a snapshot pass is a request-scoped read.
const MAX_SNAPSHOT_TIMEOUT_SECS: u64 = 3600;

fn default_snapshot_timeout_secs() -> u64 {
    DEFAULT_SNAPSHOT_TIMEOUT.as_secs()
}

fn default_workload_label_key() -> String {
    DEFAULT_WORKLOAD_LABEL_KEY.to_string()
}

fn default_fetch_concurrency() -> usize {
    DEFAULT_FETCH_CONCURRENCY
}

impl ClusterConfig {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            workload_label_key: self.workload_label_key.clone(),
            snapshot_timeout: Duration::from_secs(self.snapshot_timeout_secs),
            fetch_concurrency: self.fetch_concurrency,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

fn default_max_pool_size() -> u32 {
    4
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            (1..=MAX_SNAPSHOT_TIMEOUT_SECS).contains(&self.cluster.snapshot_timeout_secs),
            "cluster.snapshot_timeout_secs must be between 1 and {}, got {}",
            MAX_SNAPSHOT_TIMEOUT_SECS,
            self.cluster.snapshot_timeout_secs
        );
        anyhow::ensure!(
            !self.cluster.workload_label_key.is_empty(),
            "cluster.workload_label_key must be non-empty"
        );
        anyhow::ensure!(
            self.cluster.fetch_concurrency > 0,
            "cluster.fetch_concurrency must be > 0, got {}",
            self.cluster.fetch_concurrency
        );
        if let Some(kubeconfig) = &self.cluster.kubeconfig {
            anyhow::ensure!(
                !kubeconfig.is_empty(),
                "cluster.kubeconfig must be non-empty when set"
            );
        }
        if let Some(catalog) = &self.catalog {
            anyhow::ensure!(!catalog.path.is_empty(), "catalog.path must be non-empty");
            anyhow::ensure!(
                catalog.max_pool_size > 0,
                "catalog.max_pool_size must be > 0, got {}",
                catalog.max_pool_size
            );
        }
        Ok(())
    }
}
