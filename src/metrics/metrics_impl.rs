use crate::metrics::traits::{DispatchMetricsRecorder, MetricsReset};

#[derive(Debug, Default, Clone)]
pub struct DispatchMetrics {
    pub add_calls: u64,
    pub add_new: u64,
    pub add_replaced: u64,
    pub edit_calls: u64,
    pub edit_hits: u64,
    pub edit_misses: u64,
    pub remove_calls: u64,
    pub remove_hits: u64,
    pub remove_misses: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub pop_empty: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub stale_discards: u64,
    pub compactions: u64,
    pub compacted_snapshots: u64,
}

impl DispatchMetrics {
    pub fn new() -> DispatchMetrics {
        Self::default()
    }
}

impl DispatchMetricsRecorder for DispatchMetrics {
    fn record_add_new(&mut self) {
        self.add_calls += 1;
        self.add_new += 1;
    }

    fn record_add_replace(&mut self) {
        self.add_calls += 1;
        self.add_replaced += 1;
    }

    fn record_edit_hit(&mut self) {
        self.edit_calls += 1;
        self.edit_hits += 1;
    }

    fn record_edit_miss(&mut self) {
        self.edit_calls += 1;
        self.edit_misses += 1;
    }

    fn record_remove_hit(&mut self) {
        self.remove_calls += 1;
        self.remove_hits += 1;
    }

    fn record_remove_miss(&mut self) {
        self.remove_calls += 1;
        self.remove_misses += 1;
    }

    fn record_pop_found(&mut self) {
        self.pop_calls += 1;
        self.pop_found += 1;
    }

    fn record_pop_empty(&mut self) {
        self.pop_calls += 1;
        self.pop_empty += 1;
    }

    fn record_peek_found(&mut self) {
        self.peek_calls += 1;
        self.peek_found += 1;
    }

    fn record_peek_empty(&mut self) {
        self.peek_calls += 1;
    }

    fn record_stale_discards(&mut self, count: usize) {
        self.stale_discards += count as u64;
    }

    fn record_compaction(&mut self, dropped: usize) {
        self.compactions += 1;
        self.compacted_snapshots += dropped as u64;
    }

    fn record_clear(&mut self) {}
}

impl MetricsReset for DispatchMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}
