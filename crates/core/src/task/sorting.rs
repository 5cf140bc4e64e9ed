use std::cmp::Ordering;

use super::types::Task;

/// Listing order: newest `created_at` first, ties broken by higher `id` first.
pub fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sorts tasks into listing order.
pub fn sort_tasks_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(newest_first);
}
