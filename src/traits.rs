//! # Cache Trait Hierarchy
//!
//! Policy-agnostic seams over [`LruCache`](crate::LruCache), so code that only
//! needs "a cache" or "a cache with removal" can be written against a trait.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert / get / contains / len          │
//!   │  is_empty / capacity / clear            │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove / remove_batch                  │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru / peek_lru / touch             │
//!   │  recency_rank                           │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait           | Extends        | Purpose                            |
//! |-----------------|----------------|------------------------------------|
//! | `CoreCache`     | -              | Universal cache operations         |
//! | `MutableCache`  | `CoreCache`    | Adds arbitrary key removal         |
//! | `LruCacheTrait` | `MutableCache` | Recency-specific inspection/evict  |
//!
//! ## Thread Safety
//!
//! None of these traits imply synchronization. Hosts that share a cache across
//! threads wrap the whole cache in a single lock.

/// Core cache operations.
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is full and `key` is new, one entry is evicted according
    /// to the cache's policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Counts as a use: may change eviction order. Use
    /// [`contains`](Self::contains) to test membership without that effect.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries. Capacity is kept.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, MutableCache};
/// use lrukit::LruCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::try_new(100).unwrap();
/// cache.put(1, "one".to_string());
/// cache.put(2, "two".to_string());
/// cache.put(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.has(&1));
/// assert!(cache.has(&2));
/// assert!(!cache.has(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value if it was present.
    ///
    /// Relative order of the remaining entries is unchanged.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning results in input order.
    ///
    /// ```
    /// use lrukit::traits::MutableCache;
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::try_new(10).unwrap();
    /// cache.put(1, "one");
    /// cache.put(2, "two");
    /// cache.put(3, "three");
    ///
    /// let removed = cache.remove_batch(&[1, 99, 3]);
    /// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
    /// assert_eq!(cache.size(), 1);
    /// ```
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-ordered caches.
///
/// # Example
///
/// ```
/// use lrukit::traits::LruCacheTrait;
/// use lrukit::LruCache;
///
/// let mut cache = LruCache::try_new(3).unwrap();
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c");
///
/// // 1 is least recent; touching it makes 2 the next victim.
/// assert!(cache.touch(&1));
/// assert_eq!(cache.peek_lru(), Some((&2, &"b")));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// assert_eq!(cache.pop_lru(), Some((2, "b")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used. Returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` = most recently used.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
