#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::LruCache;
use std::collections::VecDeque;

// Fuzz eviction order against a linear-scan reference
//
// Every byte is a key. Even bytes are puts, odd bytes are gets. The reference
// keeps keys in MRU-first order; the cache's iteration order must match it.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let capacity = usize::from(data[0] % 16) + 1;
    let mut cache: LruCache<u8, ()> = LruCache::try_new(capacity).unwrap();
    let mut reference: VecDeque<u8> = VecDeque::new();

    for &byte in &data[1..] {
        let key = byte >> 1;
        let promote = |reference: &mut VecDeque<u8>| {
            if let Some(pos) = reference.iter().position(|&k| k == key) {
                reference.remove(pos);
                reference.push_front(key);
                true
            } else {
                false
            }
        };

        if byte & 1 == 0 {
            cache.put(key, ());
            if !promote(&mut reference) {
                reference.push_front(key);
                if reference.len() > capacity {
                    reference.pop_back();
                }
            }
        } else {
            let hit = cache.get(&key).is_some();
            assert_eq!(hit, promote(&mut reference));
        }

        assert!(cache.keys().copied().eq(reference.iter().copied()));
    }
});
