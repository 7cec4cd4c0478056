//! # Metrics Traits
//!
//! Recording, snapshotting and resetting are split into small traits so the
//! cache only ever writes counters, and readers only ever see snapshots.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   &mut self, hot path
//!   └──────────────┬──────────────┘
//!                  ▼
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │     LruMetricsRecorder      │   │   LruMetricsReadRecorder    │
//!   │  delete/pop_lru/touch       │   │  has/peek/rank (&self)      │
//!   └─────────────────────────────┘   └─────────────────────────────┘
//!
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>  │   │        MetricsReset         │
//!   └─────────────────────────────┘   └─────────────────────────────┘
//! ```

/// Counters every cache records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Recency-specific counters recorded from `&mut self` methods.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_delete_call(&mut self);
    fn record_delete_found(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Recency-specific counters recorded from `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_has_call(&self);
    fn record_has_found(&self);
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_steps(&self, steps: u64);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
