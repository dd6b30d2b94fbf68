//! Dispatcher metrics (enabled with the `metrics` feature).
//!
//! Recording, storage and snapshotting are split the same way throughout:
//!
//! - [`traits`]: the [`DispatchMetricsRecorder`](traits::DispatchMetricsRecorder)
//!   hooks the dispatcher calls on every operation, plus
//!   [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).
//! - [`metrics_impl`]: plain counter storage owned by each dispatcher.
//! - [`snapshot`]: the `Copy` value handed to benches, tests and exporters.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
