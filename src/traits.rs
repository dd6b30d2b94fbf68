//! # Dispatch Traits
//!
//! The operation set every lazily invalidated dispatcher shares, so callers
//! can stay generic over the tie-break policy (and over wrappers such as the
//! metrics-enabled build) without naming concrete types.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │        PriorityDispatch<K, P, V>        │
//!   │                                         │
//!   │  add(&mut, K, P, V) → Option<(P, V)>    │
//!   │  edit(&mut, &K, P) → Option<P>          │
//!   │  remove(&mut, &K) → Option<(P, V)>      │
//!   │  pop_top(&mut) → Option<(K, P, V)>      │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  pop_batch(&mut, n) → Vec<(K, P, V)>    │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! | Trait                | Extends       | Purpose                               |
//! |----------------------|---------------|---------------------------------------|
//! | `PriorityDispatch`   | -             | Mutate-by-key, validated extract-max  |
//! | `ConcurrentDispatch` | `Send + Sync` | Marker for lock-guarded dispatchers   |
//!
//! ## Example
//!
//! ```
//! use lazydispatch::dispatcher::Dispatcher;
//! use lazydispatch::tie_break::LowerKeyFirst;
//! use lazydispatch::traits::PriorityDispatch;
//!
//! fn top_two<D: PriorityDispatch<u32, u32, ()>>(d: &mut D) -> Vec<u32> {
//!     d.pop_batch(2).into_iter().map(|(k, _, _)| k).collect()
//! }
//!
//! let mut d: Dispatcher<u32, u32, (), LowerKeyFirst> = Dispatcher::new();
//! d.add(5, 1, ());
//! d.add(2, 1, ());
//! d.add(8, 0, ());
//! assert_eq!(top_two(&mut d), vec![2, 5]);
//! ```

use std::hash::Hash;

use crate::dispatcher::Dispatcher;
use crate::tie_break::TieBreak;

/// Mutate-by-key, lazily validated extract-max.
pub trait PriorityDispatch<K, P, V> {
    /// Inserts or overwrites `key`; returns the replaced entry.
    fn add(&mut self, key: K, priority: P, payload: V) -> Option<(P, V)>;

    /// Re-prioritises a live `key`; absent keys are ignored.
    fn edit(&mut self, key: &K, new_priority: P) -> Option<P>;

    /// Removes a live `key`; absent keys are ignored.
    fn remove(&mut self, key: &K) -> Option<(P, V)>;

    /// Pops the highest-priority live entry, or `None` when empty.
    fn pop_top(&mut self) -> Option<(K, P, V)>;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pops up to `count` entries in dispatch order.
    fn pop_batch(&mut self, count: usize) -> Vec<(K, P, V)> {
        let mut out = Vec::with_capacity(count.min(self.len()));
        for _ in 0..count {
            match self.pop_top() {
                Some(entry) => out.push(entry),
                None => break,
            }
        }
        out
    }
}

/// Marker for dispatchers safe to share across threads.
pub trait ConcurrentDispatch: Send + Sync {}

impl<K, P, V, T> PriorityDispatch<K, P, V> for Dispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    #[inline]
    fn add(&mut self, key: K, priority: P, payload: V) -> Option<(P, V)> {
        Dispatcher::add(self, key, priority, payload)
    }

    #[inline]
    fn edit(&mut self, key: &K, new_priority: P) -> Option<P> {
        Dispatcher::edit(self, key, new_priority)
    }

    #[inline]
    fn remove(&mut self, key: &K) -> Option<(P, V)> {
        Dispatcher::remove(self, key)
    }

    #[inline]
    fn pop_top(&mut self) -> Option<(K, P, V)> {
        Dispatcher::pop_top(self)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        Dispatcher::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        Dispatcher::len(self)
    }
}
