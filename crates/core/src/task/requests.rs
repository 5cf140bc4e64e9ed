//! API request types for task operations.
//!
//! Required fields have no serde default, so a body that omits them is
//! rejected at deserialization instead of being silently filled in.

use serde::{Deserialize, Serialize};

use super::error::{TaskError, MAX_TITLE_LEN};
use super::types::NewTask;

/// Request payload for `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTaskRequest {
    /// Create a new request with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Validates the request and converts it into a store payload.
    pub fn into_new_task(self) -> Result<NewTask, TaskError> {
        validate_title(&self.title)?;
        Ok(NewTask {
            title: self.title,
            description: self.description,
            completed: self.completed,
        })
    }
}

/// Request payload for `PUT /tasks/{id}`.
///
/// Updates replace every client-writable field, so `completed` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
}

impl UpdateTaskRequest {
    /// Validates the request and converts it into a store payload.
    pub fn into_new_task(self) -> Result<NewTask, TaskError> {
        validate_title(&self.title)?;
        Ok(NewTask {
            title: self.title,
            description: self.description,
            completed: self.completed,
        })
    }
}

/// Validates a task title.
pub fn validate_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::TitleTooLong);
    }
    Ok(())
}
