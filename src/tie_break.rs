//! Tie-break policies for equal-priority entries.
//!
//! A [`Dispatcher`](crate::dispatcher::Dispatcher) always surfaces the
//! highest priority first. When two live entries share a priority, the
//! dispatcher's `T: TieBreak<K>` type parameter decides which one wins.
//! Policies are zero-sized marker types, so the choice costs nothing at
//! runtime and cannot drift between calls.
//!
//! | Policy           | Winner among equal priorities      | Bound on `K` |
//! |------------------|------------------------------------|--------------|
//! | [`OldestFirst`]  | earliest write (FIFO)              | none         |
//! | [`NewestFirst`]  | latest write (LIFO)                | none         |
//! | [`HigherKeyFirst`] | largest key                      | `K: Ord`     |
//! | [`LowerKeyFirst`]  | smallest key                     | `K: Ord`     |
//!
//! "Write" means the last `add` or `edit` of the key: editing an entry
//! re-stamps it, so under [`OldestFirst`] an edited entry queues behind
//! entries that were last written before it.
//!
//! ## Example
//!
//! ```
//! use lazydispatch::dispatcher::Dispatcher;
//! use lazydispatch::tie_break::HigherKeyFirst;
//!
//! let mut tasks: Dispatcher<u32, u32, &str, HigherKeyFirst> = Dispatcher::new();
//! tasks.add(101, 8, "alice");
//! tasks.add(205, 8, "bob");
//!
//! // Same priority: the larger task id wins.
//! assert_eq!(tasks.pop_top(), Some((205, 8, "bob")));
//! ```

use std::cmp::Ordering;

/// Decides which of two equal-priority snapshots is dispatched first.
///
/// `compare` returns [`Ordering::Greater`] when the entry described by
/// `(a, a_version)` must be dispatched before `(b, b_version)`. Versions are
/// unique per write, so implementations that fall back to the version never
/// report [`Ordering::Equal`] for distinct snapshots.
pub trait TieBreak<K> {
    fn compare(a: &K, a_version: u64, b: &K, b_version: u64) -> Ordering;
}

/// Earliest write wins among equal priorities (FIFO). Default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OldestFirst;

/// Latest write wins among equal priorities (LIFO).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NewestFirst;

/// Largest key wins among equal priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HigherKeyFirst;

/// Smallest key wins among equal priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LowerKeyFirst;

impl<K> TieBreak<K> for OldestFirst {
    #[inline]
    fn compare(_a: &K, a_version: u64, _b: &K, b_version: u64) -> Ordering {
        b_version.cmp(&a_version)
    }
}

impl<K> TieBreak<K> for NewestFirst {
    #[inline]
    fn compare(_a: &K, a_version: u64, _b: &K, b_version: u64) -> Ordering {
        a_version.cmp(&b_version)
    }
}

impl<K: Ord> TieBreak<K> for HigherKeyFirst {
    #[inline]
    fn compare(a: &K, a_version: u64, b: &K, b_version: u64) -> Ordering {
        // Snapshots of the same key order by version; only one is live anyway.
        a.cmp(b).then_with(|| a_version.cmp(&b_version))
    }
}

impl<K: Ord> TieBreak<K> for LowerKeyFirst {
    #[inline]
    fn compare(a: &K, a_version: u64, b: &K, b_version: u64) -> Ordering {
        b.cmp(a).then_with(|| a_version.cmp(&b_version))
    }
}
