//! lazydispatch: priority dispatcher with lazy invalidation.
//!
//! A [`Dispatcher`](dispatcher::Dispatcher) keeps `(key, priority, payload)`
//! entries and pops the highest-priority live one. Edits and removals only
//! touch an authoritative index; superseded heap snapshots are discarded when
//! they reach the top.
//!
//! - [`dispatcher`]: the core structure
//! - [`tie_break`]: policies for equal priorities
//! - [`builder`]: capacity and auto-compaction configuration
//! - [`apps`]: task manager, food ratings and packet router built on top
//! - `concurrent` (feature `concurrency`): lock-guarded wrapper
//! - `metrics` (feature `metrics`): operation counters

pub mod apps;
pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod dispatcher;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod prelude;
pub mod tie_break;
pub mod traits;
