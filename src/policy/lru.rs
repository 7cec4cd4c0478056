//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity cache that always evicts the entry which has gone longest
//! without being used. Reads (`get` hits) and writes (`put`) are both uses.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>                                        │
//!   │   ┌─────────┬──────────┐                                             │
//!   │   │   Key   │  SlotId  │                                             │
//!   │   ├─────────┼──────────┤                                             │
//!   │   │ "sess1" │  id_2  ──┼──────────────────┐                          │
//!   │   │ "sess2" │  id_0  ──┼────────┐         │                          │
//!   │   │ "sess3" │  id_1  ──┼──┐     │         │                          │
//!   │   └─────────┴──────────┘  │     │         │                          │
//!   │                           ▼     ▼         ▼                          │
//!   │   list: RecencyList<Entry<K, V>>  (nodes in a SlotArena)             │
//!   │                                                                      │
//!   │   head ──► [id_1] ◄──► [id_0] ◄──► [id_2] ◄── tail                   │
//!   │     (MRU)   sess3       sess2       sess1      (LRU)                 │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the list always describe the same set of entries:
//! `size == index.len() == nodes reachable from head`, and
//! `size <= capacity` after every public call returns.
//!
//! ## Operations
//!
//! ```text
//!   put(D) with cache full (capacity = 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!     1. unlink tail [C], drop it from the index
//!     2. link [D] at head, add it to the index
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!     1. index lookup: O(1)
//!     2. unlink [B], link at head: O(1)
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! | Method             | Complexity | Recency effect                     |
//! |--------------------|------------|------------------------------------|
//! | `get` / `get_mut`  | O(1)       | hit moves entry to head            |
//! | `put`              | O(1)       | entry moves/links to head; may evict tail |
//! | `has` / `peek`     | O(1)       | none                               |
//! | `delete` / `take`  | O(1)       | none on remaining entries          |
//! | `touch`            | O(1)       | moves entry to head                |
//! | `pop_lru`          | O(1)       | removes tail                       |
//! | `peek_lru`         | O(1)       | none                               |
//! | `recency_rank`     | O(n)       | none                               |
//! | `clear`            | O(n)       | removes everything                 |
//!
//! ## Thread Safety
//!
//! `LruCache` has no internal synchronization. Index and list updates are not
//! atomic together, so a host that shares a cache across threads must hold one
//! exclusive lock around every call.
//!
//! ## Example
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::try_new(2).unwrap();
//! cache.put("a", 1);
//! cache.put("b", 2);
//!
//! assert_eq!(cache.get(&"a"), Some(&1)); // "b" is now least recent
//! cache.put("c", 3);                     // evicts "b"
//!
//! assert!(!cache.has(&"b"));
//! assert_eq!(cache.size(), 2);
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::CacheConfig;
use crate::ds::{RecencyList, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One resident key/value pair. Its list position is owned by the node that
/// holds it.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// What a [`put_entry`](LruCache::put_entry) call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome<K, V> {
    /// New key, cache had room.
    Inserted,
    /// Existing key; carries the value that was replaced.
    Replaced(V),
    /// New key, cache was full; carries the least recently used entry that
    /// was evicted to make room.
    Evicted(K, V),
}

/// Fixed-capacity, strict-recency LRU cache.
///
/// `K` must be `Eq + Hash` for the index and `Clone` because the key is held by
/// both the index and the entry.
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: NonZeroUsize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Storage grows on demand; see [`LruCacheBuilder`](crate::builder::LruCacheBuilder)
    /// to reserve it up front.
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    /// use lrukit::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(NonZeroUsize::new(100).unwrap());
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_storage(capacity, 0)
    }

    /// Creates an empty cache, rejecting a zero capacity.
    ///
    /// ```
    /// use lrukit::error::ConfigError;
    /// use lrukit::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(1).is_ok());
    /// assert_eq!(
    ///     LruCache::<u32, u32>::try_new(0).unwrap_err(),
    ///     ConfigError::InvalidCapacity { capacity: 0 },
    /// );
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or_else(|| ConfigError::invalid_capacity(capacity))?;
        Ok(Self::new(capacity))
    }

    /// Creates an empty cache from a signed capacity, rejecting `<= 0`.
    ///
    /// For hosts whose configuration carries capacities as signed integers.
    ///
    /// ```
    /// use lrukit::error::ConfigError;
    /// use lrukit::LruCache;
    ///
    /// assert_eq!(
    ///     LruCache::<u32, u32>::try_from_signed(-5).unwrap_err(),
    ///     ConfigError::InvalidCapacity { capacity: -5 },
    /// );
    /// ```
    pub fn try_from_signed(capacity: i64) -> Result<Self, ConfigError> {
        let capacity = usize::try_from(capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(ConfigError::InvalidCapacity { capacity })?;
        Ok(Self::new(capacity))
    }

    /// Creates an empty cache from a [`CacheConfig`].
    pub fn try_with_config(config: CacheConfig) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or_else(|| ConfigError::invalid_capacity(config.capacity))?;
        let reserve = if config.prealloc { capacity.get() } else { 0 };
        Ok(Self::with_storage(capacity, reserve))
    }

    // Reservation is best effort; on failure storage grows on demand.
    fn with_storage(capacity: NonZeroUsize, reserve: usize) -> Self {
        debug!(capacity = capacity.get(), reserve, "creating lru cache");
        let mut cache = Self {
            index: FxHashMap::default(),
            list: RecencyList::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        };
        if reserve > 0
            && let Err(err) = cache
                .index
                .try_reserve(reserve)
                .and_then(|()| cache.list.try_reserve(reserve))
        {
            debug!(reserve, error = %err, "preallocation failed; storage grows on demand");
        }
        cache
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and changes nothing.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = self.hit(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.hit(key)?;
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    fn hit(&mut self, key: &K) -> Option<SlotId> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);

        #[cfg(test)]
        self.debug_validate_invariants();

        Some(id)
    }

    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Returns the replaced value when `key` was already resident. When `key`
    /// is new and the cache is full, the least recently used entry is evicted;
    /// use [`put_entry`](Self::put_entry) to receive it.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.put_entry(key, value) {
            PutOutcome::Replaced(previous) => Some(previous),
            PutOutcome::Inserted | PutOutcome::Evicted(..) => None,
        }
    }

    /// Inserts or updates `key` and reports exactly what happened.
    ///
    /// ```
    /// use lrukit::{LruCache, PutOutcome};
    ///
    /// let mut cache = LruCache::try_new(1).unwrap();
    /// assert_eq!(cache.put_entry("x", 10), PutOutcome::Inserted);
    /// assert_eq!(cache.put_entry("x", 11), PutOutcome::Replaced(10));
    /// assert_eq!(cache.put_entry("y", 20), PutOutcome::Evicted("x", 11));
    /// ```
    pub fn put_entry(&mut self, key: K, value: V) -> PutOutcome<K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key)
            && let Some(entry) = self.list.get_mut(id)
        {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = mem::replace(&mut entry.value, value);
            self.list.move_to_front(id);

            #[cfg(test)]
            self.debug_validate_invariants();

            return PutOutcome::Replaced(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        // Evicting before linking keeps the arena at `capacity` slots.
        let evicted = if self.list.len() >= self.capacity.get() {
            self.evict_lru()
        } else {
            None
        };

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        #[cfg(test)]
        self.debug_validate_invariants();

        match evicted {
            Some((key, value)) => PutOutcome::Evicted(key, value),
            None => PutOutcome::Inserted,
        }
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let evicted = self.detach_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        trace!(
            capacity = self.capacity.get(),
            "evicted least recently used entry"
        );
        Some(evicted)
    }

    fn detach_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Returns `true` if `key` is resident. Does not affect recency.
    pub fn has(&self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_has_call();

        let found = self.index.contains_key(key);

        #[cfg(feature = "metrics")]
        if found {
            self.metrics.record_has_found();
        }

        found
    }

    /// Returns the value for `key` without marking it used.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let value = self
            .index
            .get(key)
            .and_then(|&id| self.list.get(id))
            .map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_peek_found();
        }

        value
    }

    /// Removes `key`; returns whether it was present.
    ///
    /// The relative order of the remaining entries is unchanged.
    ///
    /// ```
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::try_new(4).unwrap();
    /// cache.put(1, "one");
    /// assert!(cache.delete(&1));
    /// assert!(!cache.delete(&1));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and returns its value.
    ///
    /// Index and list removal happen together: the result is `Some` if and
    /// only if `key` was resident.
    pub fn take(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        let id = self.index.remove(key)?;
        let entry = self.list.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_delete_found();

        #[cfg(test)]
        self.debug_validate_invariants();

        Some(entry.value)
    }

    /// Removes every entry. Capacity is kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let dropped = self.list.len();
        self.index.clear();
        self.list.clear();
        debug!(dropped, "cleared lru cache");
    }

    /// Number of resident entries.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Maximum number of resident entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.detach_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        #[cfg(test)]
        self.debug_validate_invariants();

        Some(popped)
    }

    /// Returns the least recently used entry, i.e. the next eviction victim.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let lru = self.list.back().map(|entry| (&entry.key, &entry.value));

        #[cfg(feature = "metrics")]
        if lru.is_some() {
            self.metrics.record_peek_lru_found();
        }

        lru
    }

    /// Marks `key` most recently used without reading it.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.list.move_to_front(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        #[cfg(test)]
        self.debug_validate_invariants();

        true
    }

    /// Position of `key` in recency order (`0` = most recently used).
    ///
    /// Walks the list from the head: O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target = self.index.get(key)?;
        let rank = self.list.iter_ids().position(|id| id == target);

        #[cfg(feature = "metrics")]
        match rank {
            Some(rank) => {
                self.metrics.record_recency_rank_found();
                self.metrics.record_recency_rank_scan_steps(rank as u64 + 1);
            },
            None => self
                .metrics
                .record_recency_rank_scan_steps(self.list.len() as u64),
        }

        rank
    }

    /// Iterates entries from most to least recently used. Does not affect recency.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Verifies that the index and recency list describe the same entries.
    ///
    /// Checks `size == index.len() == nodes reachable from head`,
    /// `size <= capacity`, and that each node's key maps back to that node.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.list.len();
        if self.index.len() != len {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                len
            )));
        }
        if len > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "size {} exceeds capacity {}",
                len, self.capacity
            )));
        }
        if self.list.front_id().is_some() != (len > 0) || self.list.back_id().is_some() != (len > 0)
        {
            return Err(InvariantError::new("head/tail presence disagrees with size"));
        }

        let mut reachable = 0usize;
        for (id, entry) in self.list.iter_entries() {
            reachable += 1;
            if reachable > len {
                return Err(InvariantError::new("recency list contains a cycle"));
            }
            if self.index.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "entry in slot {} is not indexed under its key",
                    id.index()
                )));
            }
        }
        if reachable != len {
            return Err(InvariantError::new(format!(
                "{} entries reachable from head, expected {}",
                reachable, len
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("lru invariant violated: {err}");
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Copies the current counters together with `size` and `capacity`.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.size(), self.capacity())
    }

    /// Zeroes every counter. Cache contents are untouched.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.has(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.size()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity.get()
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        self.take(key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len())
            .finish_non_exhaustive()
    }
}
