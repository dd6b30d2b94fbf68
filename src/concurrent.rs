//! Thread-safe dispatcher (enabled with the `concurrency` feature).
//!
//! `pop_top` is a multi-step pop-and-validate loop. Interleaving it with an
//! `edit` or `remove` on another thread could return an entry that was just
//! invalidated, so the index and the heap live behind one
//! `parking_lot::RwLock` and every mutating call holds the write lock for its
//! whole duration. Read-only queries share the read lock.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use lazydispatch::concurrent::ConcurrentDispatcher;
//!
//! let d: Arc<ConcurrentDispatcher<u32, u32, ()>> = Arc::new(ConcurrentDispatcher::new());
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let d = Arc::clone(&d);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 d.add(t * 100 + i, i, ());
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(d.len(), 400);
//! ```

use std::hash::Hash;

use parking_lot::RwLock;

use crate::dispatcher::Dispatcher;
use crate::tie_break::{OldestFirst, TieBreak};
use crate::traits::ConcurrentDispatch;

/// Thread-safe wrapper around [`Dispatcher`] using a single `parking_lot::RwLock`.
#[derive(Debug)]
pub struct ConcurrentDispatcher<K, P, V, T = OldestFirst> {
    inner: RwLock<Dispatcher<K, P, V, T>>,
}

impl<K, P, V, T> ConcurrentDispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    /// Creates an empty concurrent dispatcher.
    pub fn new() -> Self {
        Self::from_dispatcher(Dispatcher::new())
    }

    /// Creates an empty concurrent dispatcher with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_dispatcher(Dispatcher::with_capacity(capacity))
    }

    /// Wraps an existing dispatcher, e.g. one produced by
    /// [`DispatcherBuilder`](crate::builder::DispatcherBuilder).
    pub fn from_dispatcher(dispatcher: Dispatcher<K, P, V, T>) -> Self {
        Self {
            inner: RwLock::new(dispatcher),
        }
    }

    /// Unwraps into the single-threaded dispatcher.
    pub fn into_inner(self) -> Dispatcher<K, P, V, T> {
        self.inner.into_inner()
    }

    pub fn add(&self, key: K, priority: P, payload: V) -> Option<(P, V)> {
        let mut d = self.inner.write();
        d.add(key, priority, payload)
    }

    pub fn edit(&self, key: &K, new_priority: P) -> Option<P> {
        let mut d = self.inner.write();
        d.edit(key, new_priority)
    }

    pub fn remove(&self, key: &K) -> Option<(P, V)> {
        let mut d = self.inner.write();
        d.remove(key)
    }

    /// Pops the highest-priority live entry under the write lock.
    pub fn pop_top(&self) -> Option<(K, P, V)> {
        let mut d = self.inner.write();
        d.pop_top()
    }

    /// Pops without blocking; returns `None` if the lock is contended.
    ///
    /// `Some(None)` means the lock was taken but nothing is live.
    pub fn try_pop_top(&self) -> Option<Option<(K, P, V)>> {
        let mut d = self.inner.try_write()?;
        Some(d.pop_top())
    }

    /// Clones out the entry the next `pop_top` would return.
    pub fn peek_top_cloned(&self) -> Option<(K, P, V)>
    where
        V: Clone,
    {
        let mut d = self.inner.write();
        d.peek_top()
            .map(|(k, p, v)| (k.clone(), p.clone(), v.clone()))
    }

    pub fn priority_of(&self, key: &K) -> Option<P> {
        let d = self.inner.read();
        d.priority_of(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        let d = self.inner.read();
        d.contains(key)
    }

    pub fn len(&self) -> usize {
        let d = self.inner.read();
        d.len()
    }

    pub fn is_empty(&self) -> bool {
        let d = self.inner.read();
        d.is_empty()
    }

    pub fn heap_len(&self) -> usize {
        let d = self.inner.read();
        d.heap_len()
    }

    pub fn compact(&self) {
        let mut d = self.inner.write();
        d.compact();
    }

    pub fn clear(&self) {
        let mut d = self.inner.write();
        d.clear();
    }

    /// Runs `f` with exclusive access, for multi-step sequences that must be
    /// atomic as a whole.
    pub fn with_exclusive<R>(&self, f: impl FnOnce(&mut Dispatcher<K, P, V, T>) -> R) -> R {
        let mut d = self.inner.write();
        f(&mut d)
    }
}

impl<K, P, V, T> Default for ConcurrentDispatcher<K, P, V, T>
where
    K: Eq + Hash + Clone,
    P: Ord + Clone,
    T: TieBreak<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P, V, T> ConcurrentDispatch for ConcurrentDispatcher<K, P, V, T>
where
    K: Send + Sync,
    P: Send + Sync,
    V: Send + Sync,
{
}
