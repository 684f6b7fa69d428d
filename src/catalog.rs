// SQLite cluster catalog. Independent of the snapshot engine.

use crate::models::Cluster;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

pub struct ClusterCatalog {
    pool: SqlitePool,
}

impl ClusterCatalog {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS clusters (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(repo = "catalog", operation = "list_clusters"))]
    pub async fn list_clusters(&self) -> anyhow::Result<Vec<Cluster>> {
        let clusters = sqlx::query_as::<_, Cluster>("SELECT id, name FROM clusters ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(clusters)
    }

    #[instrument(skip(self), fields(repo = "catalog", operation = "get_cluster"))]
    pub async fn get_cluster(&self, id: i64) -> anyhow::Result<Option<Cluster>> {
        let cluster = sqlx::query_as::<_, Cluster>("SELECT id, name FROM clusters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cluster)
    }

    #[instrument(skip(self), fields(repo = "catalog", operation = "insert_cluster"))]
    pub async fn insert_cluster(&self, name: &str) -> anyhow::Result<Cluster> {
        let id = sqlx::query("INSERT INTO clusters (name) VALUES ($1)")
            .bind(name)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        Ok(Cluster {
            id,
            name: name.to_string(),
        })
    }
}
