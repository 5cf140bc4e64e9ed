//! Task CRUD handlers.
//!
//! Writes run on a spawned task so that a client disconnect cannot drop the
//! future between the store commit and the cache invalidation.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::Serialize;

use taskstack_core::storage::RepositoryError;
use taskstack_core::task::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

use crate::{handlers::AppError, state::AppState};

/// Response body for `DELETE /tasks/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub id: TaskId,
}

/// Create a task (POST /tasks).
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let Json(request) = payload?;
    let new = request.into_new_task().map_err(RepositoryError::from)?;

    let tasks = state.tasks.clone();
    let task = tokio::spawn(async move { tasks.create_task(new).await }).await??;

    Ok(Json(task))
}

/// List all tasks, newest first (GET /tasks).
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(tasks))
}

/// Get a single task (GET /tasks/{id}).
pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<Task>, AppError> {
    let Path(id) = id?;
    let task = state.tasks.get_task(id).await?;
    Ok(Json(task))
}

/// Replace a task's writable fields (PUT /tasks/{id}).
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let changes = request.into_new_task().map_err(RepositoryError::from)?;

    let tasks = state.tasks.clone();
    let task = tokio::spawn(async move { tasks.update_task(id, changes).await }).await??;

    Ok(Json(task))
}

/// Delete a task (DELETE /tasks/{id}).
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(id) = id?;

    let tasks = state.tasks.clone();
    tokio::spawn(async move { tasks.delete_task(id).await }).await??;

    Ok(Json(DeleteResponse {
        message: "Task deleted",
        id,
    }))
}
