pub use crate::apps::{FoodRatings, Packet, Router, Task, TaskManager};
pub use crate::builder::DispatcherBuilder;
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentDispatcher;
pub use crate::dispatcher::Dispatcher;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::DispatchMetricsSnapshot;
pub use crate::tie_break::{HigherKeyFirst, LowerKeyFirst, NewestFirst, OldestFirst, TieBreak};
pub use crate::traits::{ConcurrentDispatch, PriorityDispatch};
