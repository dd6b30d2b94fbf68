//! Priority dispatcher with lazy invalidation.
//!
//! Maintains a dynamic set of `(key, priority, payload)` entries and hands
//! out the highest-priority live entry on demand. Priority changes and
//! removals never search the heap: they rewrite the authoritative index and,
//! for edits, push a fresh snapshot. Superseded snapshots stay in the heap
//! until they surface at the top, where [`pop_top`](Dispatcher::pop_top)
//! recognises and discards them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         Dispatcher Layout                                   │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐    │
//! │   │  index: FxHashMap<K, Live>   (authoritative source of truth)      │    │
//! │   │                                                                   │    │
//! │   │    ┌─────────┬──────────┬─────────┬─────────┐                    │    │
//! │   │    │  key    │ priority │ payload │ version │                    │    │
//! │   │    ├─────────┼──────────┼─────────┼─────────┤                    │    │
//! │   │    │   1     │    2     │  "t1"   │    2    │                    │    │
//! │   │    │   2     │    3     │  "t2"   │    1    │                    │    │
//! │   │    └─────────┴──────────┴─────────┴─────────┘                    │    │
//! │   │                                                                   │    │
//! │   │    len() = 2 (live entries)                                      │    │
//! │   └───────────────────────────────────────────────────────────────────┘    │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐    │
//! │   │  heap: BinaryHeap<HeapEntry>   (max-heap, may hold stale entries) │    │
//! │   │                                                                   │    │
//! │   │    ┌────────────────────────────────────────────────────────┐   │    │
//! │   │    │ (1, prio 5, v0) ← STALE: index[1].version = 2          │   │    │
//! │   │    │ (2, prio 3, v1) ← current, matches index[2]            │   │    │
//! │   │    │ (1, prio 2, v2) ← current, matches index[1]            │   │    │
//! │   │    └────────────────────────────────────────────────────────┘   │    │
//! │   │                                                                   │    │
//! │   │    heap_len() = 3 (includes stale entries)                       │    │
//! │   └───────────────────────────────────────────────────────────────────┘    │
//! │                                                                             │
//! │   next_version: 3  (stamped on every add/edit)                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Pop Flow
//! ────────
//!   pop_top():
//!     loop:
//!       entry = heap.pop()                  → (1, 5, v0)
//!       index[1].version == v0?             → No, discard
//!       entry = heap.pop()                  → (2, 3, v1)
//!       index[2].version == v1?             → Yes
//!         index.remove(2)
//!         return (2, 3, "t2")
//! ```
//!
//! ## Operations
//!
//! | Operation       | Description                               | Complexity          |
//! |-----------------|-------------------------------------------|---------------------|
//! | `add`           | Insert or overwrite, push snapshot        | O(log n)            |
//! | `edit`          | Re-prioritise a live key, push snapshot   | O(log n)            |
//! | `remove`        | Drop from index only                      | O(1)                |
//! | `pop_top`       | Pop best live entry, skip stale snapshots | Amortized O(log n)  |
//! | `peek_top`      | Discard stale top, borrow best live entry | Amortized O(log n)  |
//! | `compact`       | Rebuild heap from the index               | O(n)                |
//! | `maybe_compact` | Compact if heap too stale                 | O(1) or O(n)        |
//!
//! ## Ordering
//!
//! Higher priority is dispatched first. Equal priorities are resolved by the
//! `T: TieBreak<K>` policy (see [`tie_break`](crate::tie_break)); the default
//! [`OldestFirst`] dispatches the entry written earliest.
//!
//! ## Resource Growth
//!
//! Every `add` and `edit` pushes a snapshot, so an update-heavy workload grows
//! the heap without bound unless [`compact`](Dispatcher::compact) is called or
//! an auto-compaction factor is configured through
//! [`DispatcherBuilder`](crate::builder::DispatcherBuilder). Nothing compacts
//! by default.
//!
//! ## Example Usage
//!
//! ```
//! use lazydispatch::dispatcher::Dispatcher;
//!
//! let mut tasks: Dispatcher<u32, u32, &str> = Dispatcher::new();
//! tasks.add(1, 5, "t1");
//! tasks.add(2, 3, "t2");
//!
//! // Drop t1 below t2; the old snapshot at priority 5 becomes stale.
//! tasks.edit(&1, 2);
//!
//! assert_eq!(tasks.pop_top(), Some((2, 3, "t2")));
//! assert_eq!(tasks.pop_top(), Some((1, 2, "t1")));
//! assert_eq!(tasks.pop_top(), None);
//! ```
//!
//! ## Thread Safety
//!
//! `Dispatcher` is not thread-safe. Use
//! [`ConcurrentDispatcher`](crate::concurrent::ConcurrentDispatcher) (feature
//! `concurrency`), which guards index and heap with one lock.
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::DispatchMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::DispatchMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{DispatchMetricsRecorder, MetricsReset, MetricsSnapshotProvider};
use crate::tie_break::{OldestFirst, TieBreak};

/// Heap snapshot of a key at one write.
struct HeapEntry<K, P, T> {
    priority: P,
    version: u64,
    key: K,
    _tie: PhantomData<fn() -> T>,
}

impl<K, P, T> HeapEntry<K, P, T> {
    #[inline]
    fn new(key: K, priority: P, version: u64) -> Self {
        Self {
            priority,
            version,
            key,
            _tie: PhantomData,
        }
    }
}

impl<K: Clone, P: Clone, T> Clone for HeapEntry<K, P, T> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone(), self.priority.clone(), self.version)
    }
}

impl<K: fmt::Debug, P: fmt::Debug, T> fmt::Debug for HeapEntry<K, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapEntry")
            .field("key", &self.key)
            .field("priority", &self.priority)
            .field("version", &self.version)
            .finish()
    }
}

impl<K, P: Ord, T: TieBreak<K>> PartialEq for HeapEntry<K, P, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, P: Ord, T: TieBreak<K>> Eq for HeapEntry<K, P, T> {}

impl<K, P: Ord, T: TieBreak<K>> PartialOrd for HeapEntry<K, P, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, P: Ord, T: TieBreak<K>> Ord for HeapEntry<K, P, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => T::compare(&self.key, self.version, &other.key, other.version),
            ordering => ordering,
        }
    }
}

/// Authoritative record of a live key.
#[derive(Debug, Clone)]
struct Live<P, V> {
    priority: P,
    payload: V,
    version: u64,
}

/// Max-priority dispatcher with O(1) removal via lazy invalidation.
///
/// # Type Parameters
///
/// - `K`: Key type (`Eq + Hash + Clone`); one live entry per key
/// - `P`: Priority type (`Ord + Clone`); larger dispatches first
/// - `V`: Payload carried with the entry; never compared or cloned
/// - `T`: Tie-break policy for equal priorities, default [`OldestFirst`]
///
/// # Example
///
/// ```
/// use lazydispatch::dispatcher::Dispatcher;
///
/// let mut jobs: Dispatcher<&str, u8, u64> = Dispatcher::new();
/// jobs.add("reindex", 1, 900);
/// jobs.add("backup", 7, 120);
/// jobs.remove(&"backup");
///
/// // The stale "backup" snapshot is skipped.
/// assert_eq!(jobs.pop_top(), Some(("reindex", 1, 900)));
/// assert_eq!(jobs.pop_top(), None);
/// ```
pub struct Dispatcher<K, P, V, T = OldestFirst> {
    index: FxHashMap<K, Live<P, V>>,
    heap: BinaryHeap<HeapEntry<K, P, T>>,
    next_version: u64,
    compact_factor: Option<usize>,
    #[cfg(feature = "metrics")]
    metrics: DispatchMetrics,
}

impl<K, P, V, T> Dispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    /// Creates an empty dispatcher.
    ///
    /// # Example
    ///
    /// ```
    /// use lazydispatch::dispatcher::Dispatcher;
    ///
    /// let d: Dispatcher<String, u32, ()> = Dispatcher::new();
    /// assert!(d.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(0, None)
    }

    /// Creates an empty dispatcher with room for `capacity` live entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, None)
    }

    pub(crate) fn with_config(capacity: usize, compact_factor: Option<usize>) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            heap: BinaryHeap::with_capacity(capacity),
            next_version: 0,
            compact_factor,
            #[cfg(feature = "metrics")]
            metrics: DispatchMetrics::default(),
        }
    }

    /// Inserts `key` with `priority` and `payload`, replacing any live entry.
    ///
    /// Last write wins: a previous entry for `key` is returned and its heap
    /// snapshots become stale.
    ///
    /// # Example
    ///
    /// ```
    /// use lazydispatch::dispatcher::Dispatcher;
    ///
    /// let mut d: Dispatcher<u32, u32, &str> = Dispatcher::new();
    /// assert_eq!(d.add(1, 5, "first"), None);
    /// assert_eq!(d.add(1, 9, "second"), Some((5, "first")));
    /// assert_eq!(d.get(&1), Some((&9, &"second")));
    /// ```
    pub fn add(&mut self, key: K, priority: P, payload: V) -> Option<(P, V)> {
        let version = self.stamp();
        let previous = self.index.insert(
            key.clone(),
            Live {
                priority: priority.clone(),
                payload,
                version,
            },
        );

        #[cfg(feature = "metrics")]
        if previous.is_some() {
            self.metrics.record_add_replace();
        } else {
            self.metrics.record_add_new();
        }

        self.heap.push(HeapEntry::new(key, priority, version));
        self.auto_compact();
        previous.map(|live| (live.priority, live.payload))
    }

    /// Changes the priority of a live `key`, keeping its payload.
    ///
    /// Returns the previous priority. An absent key is ignored and yields
    /// `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use lazydispatch::dispatcher::Dispatcher;
    ///
    /// let mut d: Dispatcher<u32, u32, ()> = Dispatcher::new();
    /// d.add(1, 5, ());
    /// assert_eq!(d.edit(&1, 2), Some(5));
    /// assert_eq!(d.edit(&42, 2), None);
    /// assert_eq!(d.heap_len(), 2);
    /// ```
    pub fn edit(&mut self, key: &K, new_priority: P) -> Option<P> {
        let version = self.next_version;
        let Some(live) = self.index.get_mut(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_edit_miss();
            return None;
        };

        let previous = std::mem::replace(&mut live.priority, new_priority.clone());
        live.version = version;
        self.next_version = self.next_version.wrapping_add(1);

        #[cfg(feature = "metrics")]
        self.metrics.record_edit_hit();

        self.heap
            .push(HeapEntry::new(key.clone(), new_priority, version));
        self.auto_compact();
        Some(previous)
    }

    /// Removes `key` and returns its priority and payload, if live.
    ///
    /// Only the index is touched; the key's heap snapshots are skipped when
    /// they surface.
    pub fn remove(&mut self, key: &K) -> Option<(P, V)> {
        let removed = self.index.remove(key);

        #[cfg(feature = "metrics")]
        if removed.is_some() {
            self.metrics.record_remove_hit();
        } else {
            self.metrics.record_remove_miss();
        }

        if removed.is_some() {
            self.auto_compact();
        }
        removed.map(|live| (live.priority, live.payload))
    }

    /// Pops the highest-priority live entry, discarding stale snapshots.
    ///
    /// Returns `None` once no live entry remains, on every subsequent call.
    ///
    /// # Example
    ///
    /// ```
    /// use lazydispatch::dispatcher::Dispatcher;
    ///
    /// let mut d: Dispatcher<u32, u32, &str> = Dispatcher::new();
    /// d.add(1, 5, "t1");
    /// d.remove(&1);
    ///
    /// // A stale snapshot of key 1 is still in the heap, but nothing is live.
    /// assert_eq!(d.heap_len(), 1);
    /// assert_eq!(d.pop_top(), None);
    /// assert_eq!(d.heap_len(), 0);
    /// ```
    pub fn pop_top(&mut self) -> Option<(K, P, V)> {
        let mut discarded = 0usize;
        let popped = loop {
            let Some(entry) = self.heap.pop() else {
                break None;
            };
            match self.index.get(&entry.key) {
                Some(live) if live.version == entry.version => {
                    debug_assert!(live.priority == entry.priority);
                    break self
                        .index
                        .remove(&entry.key)
                        .map(|live| (entry.key, live.priority, live.payload));
                },
                _ => discarded += 1,
            }
        };
        self.note_discards(discarded, "pop_top");

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_found();
        } else {
            self.metrics.record_pop_empty();
        }

        popped
    }

    /// Returns the entry [`pop_top`](Self::pop_top) would return, without
    /// consuming it.
    ///
    /// Takes `&mut self` because stale snapshots at the top are discarded on
    /// the way.
    ///
    /// # Example
    ///
    /// ```
    /// use lazydispatch::dispatcher::Dispatcher;
    ///
    /// let mut d: Dispatcher<&str, u32, &str> = Dispatcher::new();
    /// d.add("kimchi", 9, "korean");
    /// d.add("ramen", 14, "japanese");
    /// d.edit(&"ramen", 8);
    ///
    /// assert_eq!(d.peek_top(), Some((&"kimchi", &9, &"korean")));
    /// assert_eq!(d.len(), 2);
    /// ```
    pub fn peek_top(&mut self) -> Option<(&K, &P, &V)> {
        let mut discarded = 0usize;
        while let Some(top) = self.heap.peek() {
            if self.is_current(top) {
                break;
            }
            self.heap.pop();
            discarded += 1;
        }
        self.note_discards(discarded, "peek_top");

        #[cfg(feature = "metrics")]
        if self.heap.is_empty() {
            self.metrics.record_peek_empty();
        } else {
            self.metrics.record_peek_found();
        }

        let top = self.heap.peek()?;
        let (key, live) = self.index.get_key_value(&top.key)?;
        Some((key, &live.priority, &live.payload))
    }

    /// Returns the live priority and payload for `key`.
    pub fn get(&self, key: &K) -> Option<(&P, &V)> {
        self.index
            .get(key)
            .map(|live| (&live.priority, &live.payload))
    }

    /// Returns the live priority for `key`.
    pub fn priority_of(&self, key: &K) -> Option<&P> {
        self.index.get(key).map(|live| &live.priority)
    }

    /// Returns a mutable reference to the payload of a live `key`.
    ///
    /// Payloads are never part of validation, so changing one does not
    /// invalidate the key's heap snapshot.
    pub fn payload_mut(&mut self, key: &K) -> Option<&mut V> {
        self.index.get_mut(key).map(|live| &mut live.payload)
    }

    /// Returns `true` if `key` is live.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the heap length, stale snapshots included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the number of stale snapshots currently held by the heap.
    pub fn stale_len(&self) -> usize {
        self.heap.len().saturating_sub(self.index.len())
    }

    /// Returns the configured auto-compaction factor, if any.
    pub fn compact_factor(&self) -> Option<usize> {
        self.compact_factor
    }

    /// Iterates over live entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &P, &V)> + '_ {
        self.index
            .iter()
            .map(|(key, live)| (key, &live.priority, &live.payload))
    }

    /// Rebuilds the heap from the index, dropping every stale snapshot.
    ///
    /// Live entries keep their versions, so the relative order of equal
    /// priorities is unchanged under every tie-break policy.
    ///
    /// # Example
    ///
    /// ```
    /// use lazydispatch::dispatcher::Dispatcher;
    ///
    /// let mut d: Dispatcher<&str, u32, ()> = Dispatcher::new();
    /// d.add("key", 0, ());
    /// for p in 1..10 {
    ///     d.edit(&"key", p);
    /// }
    /// assert_eq!(d.heap_len(), 10);
    ///
    /// d.compact();
    /// assert_eq!(d.heap_len(), 1);
    /// assert_eq!(d.pop_top(), Some(("key", 9, ())));
    /// ```
    pub fn compact(&mut self) {
        let before = self.heap.len();
        let entries: Vec<HeapEntry<K, P, T>> = self
            .index
            .iter()
            .map(|(key, live)| HeapEntry::new(key.clone(), live.priority.clone(), live.version))
            .collect();
        self.heap = BinaryHeap::from(entries);
        let dropped = before.saturating_sub(self.heap.len());

        #[cfg(feature = "metrics")]
        self.metrics.record_compaction(dropped);

        debug!(
            before,
            after = self.heap.len(),
            dropped,
            "compacted dispatcher heap"
        );
    }

    /// Compacts if `heap_len() > len() * factor`.
    ///
    /// A `factor` of 0 is treated as 1. Returns `true` if a rebuild ran.
    pub fn maybe_compact(&mut self, factor: usize) -> bool {
        let factor = factor.max(1);
        if self.heap.len() > self.index.len().saturating_mul(factor) {
            self.compact();
            true
        } else {
            false
        }
    }

    /// Removes every entry and stale snapshot.
    pub fn clear(&mut self) {
        self.index.clear();
        self.heap.clear();

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.index.reserve(additional);
        self.heap.reserve(additional);
    }

    /// Shrinks internal storage to fit current contents.
    pub fn shrink_to_fit(&mut self) {
        self.index.shrink_to_fit();
        self.heap.shrink_to_fit();
    }

    /// Pops entries in dispatch order until the dispatcher is empty.
    ///
    /// Entries not consumed when the iterator is dropped stay live.
    pub fn drain_ordered(&mut self) -> DrainOrdered<'_, K, P, V, T> {
        DrainOrdered { dispatcher: self }
    }

    /// Consumes the dispatcher, returning all live entries in dispatch order.
    pub fn into_sorted_vec(mut self) -> Vec<(K, P, V)> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(entry) = self.pop_top() {
            out.push(entry);
        }
        out
    }

    /// Validates the index/heap relationship.
    ///
    /// Every live key must have exactly one current snapshot whose priority
    /// matches the index, and no version may be ahead of the counter.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: fmt::Debug,
    {
        if self.heap.len() < self.index.len() {
            return Err(InvariantError::new(format!(
                "heap holds {} snapshots for {} live keys",
                self.heap.len(),
                self.index.len()
            )));
        }

        let mut current: FxHashMap<&K, usize> = FxHashMap::default();
        for entry in self.heap.iter() {
            if entry.version >= self.next_version {
                return Err(InvariantError::new(format!(
                    "snapshot of {:?} has version {} ahead of counter {}",
                    entry.key, entry.version, self.next_version
                )));
            }
            if let Some(live) = self.index.get(&entry.key) {
                if live.version == entry.version {
                    if live.priority != entry.priority {
                        return Err(InvariantError::new(format!(
                            "current snapshot of {:?} disagrees with index priority",
                            entry.key
                        )));
                    }
                    *current.entry(&entry.key).or_insert(0) += 1;
                }
            }
        }

        for key in self.index.keys() {
            match current.get(key) {
                Some(1) => {},
                Some(n) => {
                    return Err(InvariantError::new(format!(
                        "{:?} has {} current snapshots",
                        key, n
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "{:?} is live but has no current snapshot",
                        key
                    )));
                },
            }
        }
        Ok(())
    }

    /// Returns a copy of the operation counters plus current index and heap sizes.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> DispatchMetricsSnapshot {
        DispatchMetricsSnapshot {
            add_calls: self.metrics.add_calls,
            add_new: self.metrics.add_new,
            add_replaced: self.metrics.add_replaced,
            edit_calls: self.metrics.edit_calls,
            edit_hits: self.metrics.edit_hits,
            edit_misses: self.metrics.edit_misses,
            remove_calls: self.metrics.remove_calls,
            remove_hits: self.metrics.remove_hits,
            remove_misses: self.metrics.remove_misses,
            pop_calls: self.metrics.pop_calls,
            pop_found: self.metrics.pop_found,
            pop_empty: self.metrics.pop_empty,
            peek_calls: self.metrics.peek_calls,
            peek_found: self.metrics.peek_found,
            stale_discards: self.metrics.stale_discards,
            compactions: self.metrics.compactions,
            compacted_snapshots: self.metrics.compacted_snapshots,
            live_len: self.index.len(),
            heap_len: self.heap.len(),
        }
    }

    #[inline]
    fn stamp(&mut self) -> u64 {
        let version = self.next_version;
        self.next_version = self.next_version.wrapping_add(1);
        version
    }

    #[inline]
    fn is_current(&self, entry: &HeapEntry<K, P, T>) -> bool {
        self.index
            .get(&entry.key)
            .is_some_and(|live| live.version == entry.version)
    }

    fn note_discards(&mut self, discarded: usize, op: &'static str) {
        if discarded == 0 {
            return;
        }
        #[cfg(feature = "metrics")]
        self.metrics.record_stale_discards(discarded);
        trace!(op, discarded, remaining = self.heap.len(), "discarded stale snapshots");
    }

    fn auto_compact(&mut self) {
        if let Some(factor) = self.compact_factor {
            self.maybe_compact(factor);
        }
    }
}

/// Iterator returned by [`Dispatcher::drain_ordered`].
pub struct DrainOrdered<'a, K, P, V, T> {
    dispatcher: &'a mut Dispatcher<K, P, V, T>,
}

impl<K, P, V, T> Iterator for DrainOrdered<'_, K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    type Item = (K, P, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.dispatcher.pop_top()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.dispatcher.len();
        (len, Some(len))
    }
}

impl<K, P, V, T> Default for Dispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P, V, T> Clone for Dispatcher<K, P, V, T>
where
    K: Clone,
    P: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            heap: self.heap.clone(),
            next_version: self.next_version,
            compact_factor: self.compact_factor,
            #[cfg(feature = "metrics")]
            metrics: self.metrics.clone(),
        }
    }
}

impl<K, P, V, T> fmt::Debug for Dispatcher<K, P, V, T>
where
    K: fmt::Debug,
    P: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("len", &self.index.len())
            .field("heap_len", &self.heap.len())
            .field("next_version", &self.next_version)
            .field("compact_factor", &self.compact_factor)
            .finish()
    }
}

impl<K, P, V, T> Extend<(K, P, V)> for Dispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    fn extend<I: IntoIterator<Item = (K, P, V)>>(&mut self, iter: I) {
        for (key, priority, payload) in iter {
            self.add(key, priority, payload);
        }
    }
}

impl<K, P, V, T> FromIterator<(K, P, V)> for Dispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    fn from_iter<I: IntoIterator<Item = (K, P, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dispatcher = Self::with_capacity(iter.size_hint().0);
        dispatcher.extend(iter);
        dispatcher
    }
}

#[cfg(feature = "metrics")]
impl<K, P, V, T> MetricsSnapshotProvider<DispatchMetricsSnapshot> for Dispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    fn snapshot(&self) -> DispatchMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, P, V, T> MetricsReset for Dispatcher<K, P, V, T> {
    fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}


#[cfg(test)]
mod property_tests {
    use std::cmp::Reverse;
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::tie_break::HigherKeyFirst;

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, u8, u16),
        Edit(u8, u8),
        Remove(u8),
        Pop,
        Peek,
        Compact,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..16, 0u8..8, any::<u16>()).prop_map(|(k, p, v)| Op::Add(k, p, v)),
            2 => (0u8..16, 0u8..8).prop_map(|(k, p)| Op::Edit(k, p)),
            1 => (0u8..16).prop_map(Op::Remove),
            2 => Just(Op::Pop),
            1 => Just(Op::Peek),
            1 => Just(Op::Compact),
        ]
    }

    /// Naive model: linear scan for the maximum (priority, key).
    fn model_best(model: &HashMap<u8, (u8, u16)>) -> Option<(u8, u8, u16)> {
        model
            .iter()
            .max_by_key(|(k, (p, _))| (*p, **k))
            .map(|(k, (p, v))| (*k, *p, *v))
    }

    proptest! {
        /// Property: dispatcher agrees with a scan-the-map model on every op
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_naive_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut d: Dispatcher<u8, u8, u16, HigherKeyFirst> = Dispatcher::new();
            let mut model: HashMap<u8, (u8, u16)> = HashMap::new();

            for op in ops {
                match op {
                    Op::Add(k, p, v) => {
                        let expected = model.insert(k, (p, v));
                        prop_assert_eq!(d.add(k, p, v), expected);
                    }
                    Op::Edit(k, p) => {
                        let expected = model.get_mut(&k).map(|entry| std::mem::replace(&mut entry.0, p));
                        prop_assert_eq!(d.edit(&k, p), expected);
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(d.remove(&k), model.remove(&k));
                    }
                    Op::Pop => {
                        let expected = model_best(&model);
                        if let Some((k, _, _)) = expected {
                            model.remove(&k);
                        }
                        prop_assert_eq!(d.pop_top(), expected);
                    }
                    Op::Peek => {
                        let expected = model_best(&model);
                        let got = d.peek_top().map(|(k, p, v)| (*k, *p, *v));
                        prop_assert_eq!(got, expected);
                    }
                    Op::Compact => {
                        d.compact();
                        prop_assert_eq!(d.heap_len(), d.len());
                    }
                }
                prop_assert_eq!(d.len(), model.len());
                prop_assert!(d.heap_len() >= d.len());
                prop_assert!(d.check_invariants().is_ok());
            }
        }

        /// Property: draining yields non-increasing priorities, then stays empty
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_drain_is_non_increasing(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut d: Dispatcher<u8, u8, u16> = Dispatcher::new();
            for op in ops {
                match op {
                    Op::Add(k, p, v) => { d.add(k, p, v); }
                    Op::Edit(k, p) => { d.edit(&k, p); }
                    Op::Remove(k) => { d.remove(&k); }
                    Op::Pop | Op::Peek | Op::Compact => {}
                }
            }

            let live = d.len();
            let drained: Vec<_> = d.drain_ordered().collect();
            prop_assert_eq!(drained.len(), live);
            for pair in drained.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
            }
            prop_assert_eq!(d.pop_top(), None);
            prop_assert_eq!(d.pop_top(), None);
        }

        /// Property: FIFO among equal priorities follows last-write order
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_oldest_first_follows_write_order(
            writes in prop::collection::vec((0u8..12, 0u8..3), 1..100)
        ) {
            let mut d: Dispatcher<u8, u8, ()> = Dispatcher::new();
            let mut last_write: HashMap<u8, (u8, usize)> = HashMap::new();
            for (stamp, (k, p)) in writes.into_iter().enumerate() {
                d.add(k, p, ());
                last_write.insert(k, (p, stamp));
            }

            let mut expected: Vec<_> = last_write.into_iter().collect();
            expected.sort_by_key(|(_, (p, stamp))| (Reverse(*p), *stamp));
            let expected: Vec<u8> = expected.into_iter().map(|(k, _)| k).collect();
            let got: Vec<u8> = d.drain_ordered().map(|(k, _, _)| k).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
