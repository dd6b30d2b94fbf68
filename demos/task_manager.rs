use lazydispatch::apps::TaskManager;

fn main() {
    let mut tm = TaskManager::new([(1, 101, 10), (2, 102, 20), (3, 103, 15)]);

    tm.add(4, 104, 5);
    tm.edit(102, 8);
    println!("exec_top -> user {}", tm.exec_top());

    tm.rmv(101);
    tm.add(5, 105, 15);
    println!("exec_top -> user {}", tm.exec_top());

    while let Some(task) = tm.pop_task() {
        println!("drain -> task {} (user {}, priority {})", task.task_id, task.user_id, task.priority);
    }
    println!("exec_top on empty -> {}", tm.exec_top());
}

// Expected output:
// exec_top -> user 3
// exec_top -> user 5
// drain -> task 102 (user 2, priority 8)
// drain -> task 104 (user 4, priority 5)
// exec_top on empty -> -1
//
// Explanation: editing task 102 down to 8 leaves its priority-20 snapshot in
// the heap; it is discarded when it surfaces instead of being executed.
