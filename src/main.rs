use anyhow::Result;
use clusterviz::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let source = Arc::new(
        cluster_source::KubeSource::connect(app_config.cluster.kubeconfig.as_deref())
            .await
            .map_err(|e| anyhow::anyhow!("kubernetes client: {}", e))?,
    );
    let aggregator = Arc::new(engine::SnapshotAggregator::new(
        source,
        app_config.cluster.aggregator_config(),
    ));

    let catalog = match &app_config.catalog {
        Some(c) => {
            let catalog = catalog::ClusterCatalog::connect(&c.path, c.max_pool_size).await?;
            catalog.init().await?;
            tracing::info!(path = %c.path, "cluster catalog ready");
            Some(Arc::new(catalog))
        }
        None => {
            tracing::info!("no [catalog] configured; cluster catalog routes disabled");
            None
        }
    };

    let app = routes::app(aggregator, catalog);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Received shutdown signal");
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
