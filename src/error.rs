//! Error types for the lrukit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero or negative capacity).
//! - [`InvariantError`]: Returned by [`LruCache::check_invariants`] when the
//!   index and the recency list disagree.
//!
//! A cache miss is never an error: lookups return `Option`/`bool`.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::LruCache;
//!
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<String, i32>::try_new(0);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { capacity: 0 });
//! ```
//!
//! [`LruCache::check_invariants`]: crate::policy::lru::LruCache::check_invariants

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new),
/// [`LruCache::try_from_signed`](crate::policy::lru::LruCache::try_from_signed)
/// and [`LruCacheBuilder::try_build`](crate::builder::LruCacheBuilder::try_build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Capacity was zero or negative.
    #[error("capacity must be > 0, got {capacity}")]
    InvalidCapacity { capacity: i64 },
}

impl ConfigError {
    pub(crate) fn invalid_capacity(capacity: impl TryInto<i64>) -> Self {
        Self::InvalidCapacity {
            capacity: capacity.try_into().unwrap_or(i64::MAX),
        }
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Only [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants)
/// produces this. Seeing one means a bug in the cache, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_names_capacity() {
        let err = ConfigError::InvalidCapacity { capacity: -3 };
        assert_eq!(err.to_string(), "capacity must be > 0, got -3");
    }

    #[test]
    fn config_invalid_capacity_from_unsigned() {
        assert_eq!(
            ConfigError::invalid_capacity(0usize),
            ConfigError::InvalidCapacity { capacity: 0 }
        );
    }

    #[test]
    fn config_invalid_capacity_saturates_huge_values() {
        assert_eq!(
            ConfigError::invalid_capacity(u64::MAX),
            ConfigError::InvalidCapacity { capacity: i64::MAX }
        );
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
