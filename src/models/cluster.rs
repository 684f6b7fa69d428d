// Cluster catalog entry

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cluster {
    pub id: i64,
    pub name: String,
}
