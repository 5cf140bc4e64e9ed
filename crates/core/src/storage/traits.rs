use async_trait::async_trait;

use crate::task::{NewTask, Task, TaskId};

use super::Result;

/// Durable task storage.
///
/// Primitives only; cache handling lives in the service layer. `id` and
/// `created_at` are generated by the store on insert.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a task and returns it with its generated `id` and `created_at`.
    async fn insert_task(&self, new: &NewTask) -> Result<Task>;

    /// Gets a task by its ID.
    async fn get_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// Lists all tasks, newest `created_at` first, ties by `id` descending.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Replaces the writable fields of a task.
    ///
    /// Returns `NotFound` without touching the store if no row matches.
    async fn update_task(&self, id: TaskId, changes: &NewTask) -> Result<Task>;

    /// Deletes a task. Returns `NotFound` if no row matches.
    async fn delete_task(&self, id: TaskId) -> Result<()>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
