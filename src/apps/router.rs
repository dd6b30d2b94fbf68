//! Router: bounded, de-duplicating packet queue.
//!
//! Packets are forwarded oldest first. The queue is a [`Dispatcher`] keyed by
//! the packet itself with `Reverse(arrival)` as priority, which gives
//! duplicate detection through the index and FIFO order through the heap.
//! When the queue is full, adding a packet evicts the oldest one.
//!
//! [`get_count`](Router::get_count) answers "how many queued packets for this
//! destination have a timestamp in `[start, end]`" from a sorted timestamp
//! list per destination.
//!
//! ## Example
//!
//! ```
//! use lazydispatch::apps::{Packet, Router};
//!
//! let mut router = Router::new(3);
//! assert!(router.add_packet(1, 4, 90));
//! assert!(router.add_packet(2, 5, 90));
//! assert!(!router.add_packet(1, 4, 90)); // duplicate
//! assert!(router.add_packet(3, 5, 95));
//! assert!(router.add_packet(4, 5, 105)); // evicts (1, 4, 90)
//! assert_eq!(router.forward_packet(), Some(Packet::new(2, 5, 90)));
//! assert!(router.add_packet(5, 2, 110));
//! assert_eq!(router.get_count(5, 100, 110), 1);
//! ```

use std::cmp::Reverse;
use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::error::ConfigError;

/// Upper bound on the queue capacity reserved by [`Router::new`].
pub const PREALLOCATE_LIMIT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Packet {
    pub source: i32,
    pub destination: i32,
    pub timestamp: i32,
}

impl Packet {
    pub const fn new(source: i32, destination: i32, timestamp: i32) -> Self {
        Self {
            source,
            destination,
            timestamp,
        }
    }
}

#[derive(Debug)]
pub struct Router {
    memory_limit: usize,
    queue: Dispatcher<Packet, Reverse<u64>, ()>,
    next_arrival: u64,
    // destination -> sorted timestamps of queued packets
    timestamps: FxHashMap<i32, VecDeque<i32>>,
}

impl Router {
    /// Creates a router holding at most `memory_limit` packets.
    ///
    /// A limit of 0 is raised to 1; use [`try_new`](Self::try_new) to reject
    /// it. At most [`PREALLOCATE_LIMIT`] slots are reserved up front.
    pub fn new(memory_limit: usize) -> Self {
        Self {
            memory_limit: memory_limit.max(1),
            queue: Dispatcher::with_capacity(memory_limit.min(PREALLOCATE_LIMIT)),
            next_arrival: 0,
            timestamps: FxHashMap::default(),
        }
    }

    pub fn try_new(memory_limit: usize) -> Result<Self, ConfigError> {
        if memory_limit == 0 {
            return Err(ConfigError::new("memory_limit must be > 0"));
        }
        Ok(Self::new(memory_limit))
    }

    /// Queues a packet. Returns `false` if an identical packet is queued.
    pub fn add_packet(&mut self, source: i32, destination: i32, timestamp: i32) -> bool {
        let packet = Packet::new(source, destination, timestamp);
        if self.queue.contains(&packet) {
            return false;
        }

        if self.queue.len() >= self.memory_limit {
            if let Some(evicted) = self.take_oldest() {
                debug!(?evicted, limit = self.memory_limit, "router full, evicted oldest packet");
            }
        }

        let arrival = self.next_arrival;
        self.next_arrival += 1;
        self.queue.add(packet, Reverse(arrival), ());

        let times = self.timestamps.entry(destination).or_default();
        let at = times.partition_point(|&t| t <= timestamp);
        times.insert(at, timestamp);
        true
    }

    /// Removes and returns the oldest queued packet.
    pub fn forward_packet(&mut self) -> Option<Packet> {
        self.take_oldest()
    }

    /// Counts queued packets for `destination` with `start <= timestamp <= end`.
    pub fn get_count(&self, destination: i32, start: i32, end: i32) -> usize {
        let Some(times) = self.timestamps.get(&destination) else {
            return 0;
        };
        if start > end {
            return 0;
        }
        let lo = times.partition_point(|&t| t < start);
        let hi = times.partition_point(|&t| t <= end);
        hi - lo
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn memory_limit(&self) -> usize {
        self.memory_limit
    }

    fn take_oldest(&mut self) -> Option<Packet> {
        let (packet, _, ()) = self.queue.pop_top()?;
        if let Some(times) = self.timestamps.get_mut(&packet.destination) {
            let at = times.partition_point(|&t| t < packet.timestamp);
            times.remove(at);
            if times.is_empty() {
                self.timestamps.remove(&packet.destination);
            }
        }
        Some(packet)
    }
}
