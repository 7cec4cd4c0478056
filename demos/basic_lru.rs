use lrukit::LruCache;

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::try_new(2).expect("capacity is non-zero");

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {value}");
    }

    cache.put(3, "gamma".to_string());

    println!("has 2? {}", cache.has(&2));
    println!("order: {:?}", cache.keys().collect::<Vec<_>>());
}

// Expected output:
// hit 1: alpha
// has 2? false
// order: [3, 1]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Putting key 3 evicts key 2.
