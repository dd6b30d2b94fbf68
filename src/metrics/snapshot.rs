/// Point-in-time copy of a dispatcher's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchMetricsSnapshot {
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

    pub stale_discards: u64, // snapshots popped off the heap without being returned
    pub compactions: u64,
    pub compacted_snapshots: u64, // stale snapshots dropped by rebuilds

    // gauges captured at snapshot time
    pub live_len: usize,
    pub heap_len: usize,
}

impl DispatchMetricsSnapshot {
    /// Fraction of heap slots holding stale snapshots, in `[0.0, 1.0]`.
    pub fn stale_ratio(&self) -> f64 {
        if self.heap_len == 0 {
            return 0.0;
        }
        (self.heap_len - self.live_len.min(self.heap_len)) as f64 / self.heap_len as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_ratio_handles_empty_heap() {
        let snapshot = DispatchMetricsSnapshot::default();
        assert_eq!(snapshot.stale_ratio(), 0.0);
    }

    #[test]
    fn stale_ratio_counts_non_live_slots() {
        let snapshot = DispatchMetricsSnapshot {
            live_len: 1,
            heap_len: 4,
            ..Default::default()
        };
        assert!((snapshot.stale_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
