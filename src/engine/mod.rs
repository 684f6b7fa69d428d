// Aggregation engine: per-workload replica health, per-node occupancy, and the
// serialized snapshot pass that joins them.

mod aggregator;
pub mod occupancy;
pub mod replica;

pub use aggregator::{
    AggregatorConfig, DEFAULT_FETCH_CONCURRENCY, DEFAULT_SNAPSHOT_TIMEOUT,
    DEFAULT_WORKLOAD_LABEL_KEY, SnapshotAggregator,
};
