//! Error types for the lazydispatch library.
//!
//! Normal dispatcher operations never fail: absent keys are no-ops and an
//! empty [`pop_top`](crate::dispatcher::Dispatcher::pop_top) yields `None`.
//! The types here cover the two places where something can be reported:
//!
//! - [`ConfigError`]: returned by [`DispatcherBuilder::try_build`] when a
//!   configuration parameter is out of range.
//! - [`InvariantError`]: returned by
//!   [`Dispatcher::check_invariants`](crate::dispatcher::Dispatcher::check_invariants)
//!   when the active index and the heap disagree.
//!
//! ## Example Usage
//!
//! ```
//! use lazydispatch::builder::DispatcherBuilder;
//! use lazydispatch::error::ConfigError;
//!
//! let ok = DispatcherBuilder::new().compact_factor(4).try_build::<u32, u32, ()>();
//! assert!(ok.is_ok());
//!
//! let bad: Result<_, ConfigError> =
//!     DispatcherBuilder::new().compact_factor(0).try_build::<u32, u32, ()>();
//! assert!(bad.unwrap_err().to_string().contains("compact_factor"));
//! ```
//!
//! [`DispatcherBuilder::try_build`]: crate::builder::DispatcherBuilder::try_build

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when dispatcher bookkeeping is inconsistent.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when dispatcher configuration parameters are invalid.
///
/// # Example
///
/// ```
/// use lazydispatch::builder::DispatcherBuilder;
///
/// let err = DispatcherBuilder::new()
///     .compact_factor(0)
///     .try_build::<u64, u64, ()>()
///     .unwrap_err();
/// assert!(err.message().contains("must be >= 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
