// ==============================================
// LRU PROPERTY TESTS (integration)
// ==============================================
//
// Random operation sequences are applied both to `LruCache` and to a naive
// Vec-backed model that does linear scans. After every step the two must agree
// on contents and recency order, and the cache's own invariant check must pass.

use lrukit::{LruCache, PutOutcome};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(u8, u16),
    Get(u8),
    Has(u8),
    Delete(u8),
    Touch(u8),
    PopLru,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small key space so hits, updates and evictions all happen often.
    let key = 0u8..12;
    prop_oneof![
        6 => (key.clone(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
        4 => key.clone().prop_map(Op::Get),
        2 => key.clone().prop_map(Op::Has),
        2 => key.clone().prop_map(Op::Delete),
        1 => key.prop_map(Op::Touch),
        1 => Just(Op::PopLru),
        1 => Just(Op::Clear),
    ]
}

/// Reference model: index 0 is most recently used.
struct Model {
    capacity: usize,
    entries: Vec<(u8, u16)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|&(k, _)| k == key)
    }

    fn get(&mut self, key: u8) -> Option<u16> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u8, value: u16) -> PutOutcome<u8, u16> {
        if let Some(pos) = self.position(key) {
            let (_, old) = self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return PutOutcome::Replaced(old);
        }
        self.entries.insert(0, (key, value));
        if self.entries.len() > self.capacity {
            let (k, v) = self.entries.pop().expect("over capacity implies non-empty");
            return PutOutcome::Evicted(k, v);
        }
        PutOutcome::Inserted
    }

    fn delete(&mut self, key: u8) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            },
            None => false,
        }
    }

    fn touch(&mut self, key: u8) -> bool {
        self.get(key).is_some()
    }

    fn pop_lru(&mut self) -> Option<(u8, u16)> {
        self.entries.pop()
    }
}

fn apply(cache: &mut LruCache<u8, u16>, model: &mut Model, op: &Op) -> Result<(), TestCaseError> {
    match *op {
        Op::Put(k, v) => prop_assert_eq!(cache.put_entry(k, v), model.put(k, v)),
        Op::Get(k) => prop_assert_eq!(cache.get(&k).copied(), model.get(k)),
        Op::Has(k) => prop_assert_eq!(cache.has(&k), model.position(k).is_some()),
        Op::Delete(k) => prop_assert_eq!(cache.delete(&k), model.delete(k)),
        Op::Touch(k) => prop_assert_eq!(cache.touch(&k), model.touch(k)),
        Op::PopLru => prop_assert_eq!(cache.pop_lru(), model.pop_lru()),
        Op::Clear => {
            cache.clear();
            model.entries.clear();
        },
    }
    Ok(())
}

proptest! {
    /// Property: the cache matches the reference model step for step.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        let mut model = Model::new(capacity);

        for op in &ops {
            apply(&mut cache, &mut model, op)?;

            let order: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(&order, &model.entries);
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    /// Property: size() never exceeds capacity.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_size_within_capacity(
        capacity in 1usize..16,
        keys in prop::collection::vec(any::<u32>(), 0..300)
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for key in keys {
            cache.put(key, ());
            prop_assert!(cache.size() <= capacity);
        }
    }

    /// Property: a new key on a full cache evicts exactly the previous LRU entry.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_eviction_removes_only_lru(
        capacity in 1usize..10,
        warmup in prop::collection::vec(0u16..40, 0..60),
        touches in prop::collection::vec(0u16..40, 0..20)
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for k in warmup {
            cache.put(k, k);
        }
        for k in touches {
            cache.get(&k);
        }
        prop_assume!(cache.size() == capacity);

        let victim = *cache.peek_lru().unwrap().0;
        let survivors: Vec<u16> = cache.keys().copied().filter(|&k| k != victim).collect();

        cache.put(1_000, 0);

        prop_assert!(!cache.has(&victim));
        for k in survivors {
            prop_assert!(cache.has(&k));
        }
        prop_assert_eq!(cache.size(), capacity);
    }

    /// Property: a get() hit on the current LRU entry spares it from the next eviction.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_get_hit_refreshes_victim(
        capacity in 2usize..10,
        keys in prop::collection::vec(0u16..30, 0..60)
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for k in keys {
            cache.put(k, k);
        }
        prop_assume!(cache.size() == capacity);

        let lru = *cache.peek_lru().unwrap().0;
        prop_assert!(cache.get(&lru).is_some());
        cache.put(1_000, 0);
        prop_assert!(cache.has(&lru));
    }

    /// Property: has() and peek() never change recency order.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_queries_are_pure(
        capacity in 1usize..8,
        keys in prop::collection::vec(0u8..16, 0..40),
        probes in prop::collection::vec(0u8..16, 0..40)
    ) {
        let mut cache = LruCache::try_new(capacity).unwrap();
        for k in keys {
            cache.put(k, k);
        }
        let before: Vec<u8> = cache.keys().copied().collect();
        for p in probes {
            let _ = cache.has(&p);
            let _ = cache.peek(&p);
            let _ = cache.recency_rank(&p);
        }
        let after: Vec<u8> = cache.keys().copied().collect();
        prop_assert_eq!(before, after);
    }
}
