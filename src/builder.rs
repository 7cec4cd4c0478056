//! Configuration and builder for [`LruCache`].
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::LruCacheBuilder;
//!
//! let mut cache = LruCacheBuilder::new(100)
//!     .prealloc(true)
//!     .try_build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```
//!
//! ## CacheConfig
//!
//! | Field      | Type    | Default | Description                              |
//! |------------|---------|---------|------------------------------------------|
//! | `capacity` | `usize` | 1024    | Maximum resident entries (must be > 0)   |
//! | `prealloc` | `bool`  | false   | Reserve index/arena storage up front     |

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;

/// Construction parameters for an [`LruCache`].
///
/// `prealloc` only affects when memory is reserved, never cache behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub prealloc: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            prealloc: false,
        }
    }
}

/// Builder for [`LruCache`]; validation happens in [`try_build`](Self::try_build).
#[derive(Debug, Clone, Copy)]
pub struct LruCacheBuilder {
    config: CacheConfig,
}

impl LruCacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Reserve storage for `capacity` entries at build time.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Builds the cache, failing with [`ConfigError::InvalidCapacity`] on zero capacity.
    ///
    /// ```
    /// use lrukit::builder::LruCacheBuilder;
    ///
    /// assert!(LruCacheBuilder::new(0).try_build::<u64, u64>().is_err());
    /// ```
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::try_with_config(self.config)
    }
}

impl Default for LruCacheBuilder {
    fn default() -> Self {
        Self::from_config(CacheConfig::default())
    }
}
