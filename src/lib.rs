//! lrukit: a fixed-capacity, strict least-recently-used cache.
//!
//! [`LruCache`] pairs a hash index (key → [`SlotId`](ds::SlotId)) with a
//! doubly linked recency list stored in a slot arena. `get`, `put`, `has` and
//! `delete` are all O(1); when a new key would push `size` past `capacity`, the
//! single least recently used entry is evicted.
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut sessions = LruCache::try_new(2)?;
//! sessions.put("req-1", vec![0u8; 16]);
//! sessions.put("req-2", vec![1u8; 16]);
//! sessions.get(&"req-1");
//! sessions.put("req-3", vec![2u8; 16]); // evicts "req-2"
//!
//! assert!(sessions.has(&"req-1"));
//! assert!(!sessions.has(&"req-2"));
//! # Ok::<(), lrukit::error::ConfigError>(())
//! ```
//!
//! Cargo features:
//! - `metrics`: per-cache counters and [`LruMetricsSnapshot`](metrics::LruMetricsSnapshot).

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::{CacheConfig, LruCacheBuilder};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::{LruCache, PutOutcome};
