//! Opt-in counters for [`LruCache`](crate::LruCache) (cargo feature `metrics`).
//!
//! ```ignore
//! let snap = cache.metrics_snapshot();
//! println!("hit rate {:.2}", snap.hit_rate());
//! ```

pub mod cell;
pub mod lru_metrics;
pub mod snapshot;
pub mod traits;

pub use lru_metrics::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
pub use traits::{MetricsReset, MetricsSnapshotProvider};
