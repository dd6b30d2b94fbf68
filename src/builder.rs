//! Dispatcher builder.
//!
//! Collects the runtime knobs of a [`Dispatcher`]: initial capacity and the
//! optional auto-compaction factor. The tie-break policy is a type parameter
//! and is picked at `build` time.
//!
//! ## Example
//!
//! ```rust
//! use lazydispatch::builder::DispatcherBuilder;
//! use lazydispatch::tie_break::HigherKeyFirst;
//!
//! let mut d = DispatcherBuilder::new()
//!     .capacity(128)
//!     .compact_factor(4)
//!     .build_with::<u32, u32, &str, HigherKeyFirst>();
//!
//! d.add(3, 1, "c");
//! d.add(9, 1, "n");
//! assert_eq!(d.pop_top(), Some((9, 1, "n")));
//! ```

use std::hash::Hash;

use crate::dispatcher::Dispatcher;
use crate::error::ConfigError;
use crate::tie_break::{OldestFirst, TieBreak};

/// Builder for [`Dispatcher`] instances.
#[derive(Debug, Clone, Default)]
pub struct DispatcherBuilder {
    capacity: usize,
    compact_factor: Option<usize>,
}

impl DispatcherBuilder {
    /// Creates a builder with no preallocation and auto-compaction disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocates room for `capacity` live entries.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enables auto-compaction: after each mutation, the heap is rebuilt when
    /// `heap_len > len * factor`.
    pub fn compact_factor(mut self, factor: usize) -> Self {
        self.compact_factor = Some(factor);
        self
    }

    /// Disables auto-compaction (the default).
    pub fn no_compaction(mut self) -> Self {
        self.compact_factor = None;
        self
    }

    /// Builds a dispatcher with the default [`OldestFirst`] tie-break.
    ///
    /// A zero compaction factor is clamped to 1; use
    /// [`try_build`](Self::try_build) to reject it instead.
    pub fn build<K, P, V>(self) -> Dispatcher<K, P, V, OldestFirst>
    where
        K: Eq + Hash + Clone,
        P: Ord + Clone,
    {
        self.build_with()
    }

    /// Builds a dispatcher with an explicit tie-break policy.
    pub fn build_with<K, P, V, T>(self) -> Dispatcher<K, P, V, T>
    where
        K: Eq + Hash + Clone,
        P: Ord + Clone,
        T: TieBreak<K>,
    {
        Dispatcher::with_config(self.capacity, self.compact_factor.map(|f| f.max(1)))
    }

    /// Validates the configuration and builds an [`OldestFirst`] dispatcher.
    pub fn try_build<K, P, V>(self) -> Result<Dispatcher<K, P, V, OldestFirst>, ConfigError>
    where
        K: Eq + Hash + Clone,
        P: Ord + Clone,
    {
        self.try_build_with()
    }

    /// Validates the configuration and builds a dispatcher with policy `T`.
    pub fn try_build_with<K, P, V, T>(self) -> Result<Dispatcher<K, P, V, T>, ConfigError>
    where
        K: Eq + Hash + Clone,
        P: Ord + Clone,
        T: TieBreak<K>,
    {
        if self.compact_factor == Some(0) {
            return Err(ConfigError::new("compact_factor must be >= 1"));
        }
        Ok(self.build_with())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tie_break::LowerKeyFirst;

    #[test]
    fn default_builder_does_not_compact() {
        let mut d = DispatcherBuilder::new().build::<u32, u32, ()>();
        assert_eq!(d.compact_factor(), None);
        d.add(1, 0, ());
        for p in 1..20 {
            d.edit(&1, p);
        }
        assert_eq!(d.heap_len(), 20);
    }

    #[test]
    fn compact_factor_is_applied() {
        let mut d = DispatcherBuilder::new()
            .compact_factor(3)
            .build::<u32, u32, ()>();
        d.add(1, 0, ());
        for p in 1..20 {
            d.edit(&1, p);
            assert!(d.heap_len() <= 3);
        }
    }

    #[test]
    fn zero_factor_rejected_by_try_build() {
        let err = DispatcherBuilder::new()
            .compact_factor(0)
            .try_build::<u32, u32, ()>()
            .unwrap_err();
        assert_eq!(err.message(), "compact_factor must be >= 1");
    }

    #[test]
    fn zero_factor_clamped_by_build() {
        let d = DispatcherBuilder::new()
            .compact_factor(0)
            .build::<u32, u32, ()>();
        assert_eq!(d.compact_factor(), Some(1));
    }

    #[test]
    fn no_compaction_overrides_factor() {
        let d = DispatcherBuilder::new()
            .compact_factor(2)
            .no_compaction()
            .try_build::<u32, u32, ()>()
            .unwrap();
        assert_eq!(d.compact_factor(), None);
    }

    #[test]
    fn build_with_policy() {
        let mut d = DispatcherBuilder::new()
            .capacity(8)
            .try_build_with::<&str, u8, (), LowerKeyFirst>()
            .unwrap();
        d.add("pear", 1, ());
        d.add("apple", 1, ());
        assert_eq!(d.pop_top(), Some(("apple", 1, ())));
    }
}
