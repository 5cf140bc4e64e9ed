//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use taskstack_core::storage::{RepositoryError, Result, TaskRepository};
use taskstack_core::task::{sort_tasks_newest_first, NewTask, Task, TaskId};

#[derive(Debug, Default)]
struct Tables {
    tasks: BTreeMap<TaskId, Task>,
    last_id: TaskId,
    last_created_at: Option<DateTime<Utc>>,
}

impl Tables {
    /// Next id, mirroring a `BIGSERIAL` sequence (never reused after delete).
    fn next_id(&mut self) -> TaskId {
        self.last_id += 1;
        self.last_id
    }

    /// Store clock that never repeats or goes backwards.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }
}

/// In-memory storage backend.
///
/// A single `RwLock` guards the table so id assignment and insertion are atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn insert_task(&self, new: &NewTask) -> Result<Task> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let created_at = tables.next_timestamp();
        let task = Task::from_new(id, created_at, new.clone());
        tables.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables.tasks.values().cloned().collect();
        sort_tasks_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn update_task(&self, id: TaskId, changes: &NewTask) -> Result<Task> {
        let mut tables = self.tables.write().await;
        let task = tables
            .tasks
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::task_not_found(id))?;
        task.apply(changes);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.tasks.remove(&id).is_none() {
            return Err(RepositoryError::task_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
