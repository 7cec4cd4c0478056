pub mod lru;
