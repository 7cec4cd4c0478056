pub use crate::builder::{CacheConfig, LruCacheBuilder};
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LruMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::lru::{LruCache, PutOutcome};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
