//! Task manager: execute the highest-priority task, owner reported back.
//!
//! Tasks are `(user_id, task_id, priority)` triples keyed by `task_id`.
//! Executing picks the highest priority; among equal priorities the larger
//! `task_id` runs first.
//!
//! ## Example
//!
//! ```
//! use lazydispatch::apps::TaskManager;
//!
//! let mut tm = TaskManager::new([(1, 101, 10), (2, 102, 20), (3, 103, 15)]);
//! tm.add(4, 104, 5);
//! tm.edit(102, 8);
//! assert_eq!(tm.exec_top(), 3); // task 103 at priority 15
//! tm.rmv(101);
//! tm.add(5, 105, 15);
//! assert_eq!(tm.exec_top(), 5); // task 105 at priority 15
//! ```

use crate::dispatcher::Dispatcher;
use crate::tie_break::HigherKeyFirst;

/// Value returned by [`TaskManager::exec_top`] when no task is pending.
pub const NO_TASK: i32 = -1;

/// An executed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    pub user_id: i32,
    pub task_id: i32,
    pub priority: i32,
}

#[derive(Debug, Default)]
pub struct TaskManager {
    tasks: Dispatcher<i32, i32, i32, HigherKeyFirst>,
}

impl TaskManager {
    /// Creates a manager seeded with `(user_id, task_id, priority)` triples.
    pub fn new(tasks: impl IntoIterator<Item = (i32, i32, i32)>) -> Self {
        let mut manager = Self::default();
        for (user_id, task_id, priority) in tasks {
            manager.add(user_id, task_id, priority);
        }
        manager
    }

    /// Adds a task for `user_id`. Re-adding a task id replaces it.
    pub fn add(&mut self, user_id: i32, task_id: i32, priority: i32) {
        self.tasks.add(task_id, priority, user_id);
    }

    /// Changes the priority of a pending task; unknown ids are ignored.
    pub fn edit(&mut self, task_id: i32, new_priority: i32) {
        self.tasks.edit(&task_id, new_priority);
    }

    /// Removes a pending task; unknown ids are ignored.
    pub fn rmv(&mut self, task_id: i32) {
        self.tasks.remove(&task_id);
    }

    /// Executes the top task and returns its user id, or [`NO_TASK`].
    pub fn exec_top(&mut self) -> i32 {
        self.pop_task().map_or(NO_TASK, |task| task.user_id)
    }

    /// Executes the top task and returns it in full.
    pub fn pop_task(&mut self) -> Option<Task> {
        self.tasks
            .pop_top()
            .map(|(task_id, priority, user_id)| Task {
                user_id,
                task_id,
                priority,
            })
    }

    /// Returns the owner of a pending task.
    pub fn user_of(&self, task_id: i32) -> Option<i32> {
        self.tasks.get(&task_id).map(|(_, user)| *user)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
