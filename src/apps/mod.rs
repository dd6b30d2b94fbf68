//! Concrete dispatchers built on [`Dispatcher`](crate::dispatcher::Dispatcher).
//!
//! Each one fixes a key, priority and tie-break policy for a particular
//! workload:
//!
//! | Type                | Key      | Priority            | Ties           |
//! |---------------------|----------|---------------------|----------------|
//! | [`TaskManager`]     | task id  | task priority       | higher task id |
//! | [`FoodRatings`]     | food     | rating (per cuisine)| smaller name   |
//! | [`Router`]          | packet   | arrival order       | n/a (unique)   |

pub mod food_ratings;
pub mod router;
pub mod task_manager;

pub use food_ratings::FoodRatings;
pub use router::{Packet, Router};
pub use task_manager::{Task, TaskManager};
