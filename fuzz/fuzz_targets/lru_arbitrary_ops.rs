#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::{LruCache, PutOutcome};

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity, then each (op, key) byte pair drives one of
// put, get, has, peek, delete, touch, pop_lru, recency_rank or clear.
// Invariants are checked after every step.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::try_new(capacity).unwrap();
    let mut step = 0u32;

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 9;
        let key = pair[1] % 64;
        step += 1;

        match op {
            0 => {
                let was_full = cache.size() == capacity;
                let existed = cache.has(&key);
                match cache.put_entry(key, step) {
                    PutOutcome::Inserted => assert!(!existed && !was_full),
                    PutOutcome::Replaced(_) => assert!(existed),
                    PutOutcome::Evicted(victim, _) => {
                        assert!(!existed && was_full);
                        assert_ne!(victim, key);
                        assert!(!cache.has(&victim));
                    },
                }
                assert!(cache.peek_lru().is_some());
                assert_eq!(cache.recency_rank(&key), Some(0));
            },
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            2 => {
                let _ = cache.has(&key);
            },
            3 => {
                assert_eq!(cache.peek(&key).is_some(), cache.has(&key));
            },
            4 => {
                let old_len = cache.size();
                if cache.delete(&key) {
                    assert_eq!(cache.size(), old_len - 1);
                }
                assert!(!cache.has(&key));
            },
            5 => {
                if cache.touch(&key) {
                    assert_eq!(cache.keys().next(), Some(&key));
                }
            },
            6 => {
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            },
            7 => {
                let rank = cache.recency_rank(&key);
                assert_eq!(rank.is_some(), cache.has(&key));
            },
            8 => {
                cache.clear();
                assert!(cache.is_empty());
            },
            _ => unreachable!(),
        }

        assert!(cache.size() <= capacity);
        cache.check_invariants().unwrap();
    }

    let snap = cache.metrics_snapshot();
    assert_eq!(snap.get_hits + snap.get_misses, snap.get_calls);
    assert_eq!(snap.cache_len, cache.size());
});
