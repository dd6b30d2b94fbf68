//! # Metrics Traits
//!
//! Recorders only write counters; providers only read them. The dispatcher
//! owns a recorder and calls into it from every public operation, while
//! benches and tests consume a [`DispatchMetricsSnapshot`] through
//! [`MetricsSnapshotProvider`].
//!
//! ```text
//!   Dispatcher::add / edit / remove / pop_top / peek_top / compact
//!                         │
//!                         ▼
//!            ┌─────────────────────────────┐
//!            │  DispatchMetricsRecorder    │   (write side)
//!            └──────────────┬──────────────┘
//!                           │ counters
//!                           ▼
//!            ┌─────────────────────────────┐
//!            │ MetricsSnapshotProvider<S>  │   (read side, bench/test)
//!            └─────────────────────────────┘
//! ```
//!
//! [`DispatchMetricsSnapshot`]: crate::metrics::snapshot::DispatchMetricsSnapshot

/// Counters for the lazy-invalidation dispatcher.
pub trait DispatchMetricsRecorder {
    fn record_add_new(&mut self);
    fn record_add_replace(&mut self);
    fn record_edit_hit(&mut self);
    fn record_edit_miss(&mut self);
    fn record_remove_hit(&mut self);
    fn record_remove_miss(&mut self);
    fn record_pop_found(&mut self);
    fn record_pop_empty(&mut self);
    fn record_peek_found(&mut self);
    fn record_peek_empty(&mut self);
    /// `count` snapshots surfaced at the heap top and were thrown away.
    fn record_stale_discards(&mut self, count: usize);
    /// `dropped` stale snapshots were removed by a heap rebuild.
    fn record_compaction(&mut self, dropped: usize);
    fn record_clear(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
