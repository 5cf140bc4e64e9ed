//! PostgreSQL repository implementation.
//!
//! Implements `TaskRepository` from `taskstack_core::storage` using sqlx.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use taskstack_core::storage::{RepositoryError, Result, TaskRepository};
use taskstack_core::task::{NewTask, Task, TaskId};

use super::conversions::TaskRow;
use super::error::map_sqlx_error;
use super::schema;

const ENTITY: &str = "Task";

/// PostgreSQL-based repository implementation.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository whose pool opens connections on first use.
    ///
    /// Never blocks or fails on an unreachable server. Queries wait at most
    /// `acquire_timeout` for a connection, then report `ConnectionFailed`.
    pub fn connect_lazy(
        options: PgConnectOptions,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);
        Self { pool }
    }

    /// Wraps an existing pool.
    #[cfg(test)]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table if it does not exist.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PostgresRepository {
    async fn insert_task(&self, new: &NewTask) -> Result<Task> {
        let row = sqlx::query_as::<_, TaskRow>(schema::INSERT_TASK)
            .bind(&new.title)
            .bind(&new.description)
            .bind(new.completed)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        Ok(row.into())
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(schema::SELECT_TASK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        Ok(row.map(Task::from))
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(schema::LIST_TASKS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update_task(&self, id: TaskId, changes: &NewTask) -> Result<Task> {
        let row = sqlx::query_as::<_, TaskRow>(schema::UPDATE_TASK)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.completed)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        row.map(Task::from)
            .ok_or_else(|| RepositoryError::task_not_found(id))
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let deleted = sqlx::query_scalar::<_, i64>(schema::DELETE_TASK)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(RepositoryError::task_not_found(id)),
        }
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, ENTITY))?;
        Ok(())
    }
}
