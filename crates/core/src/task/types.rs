use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// A unit of work as persisted by the store.
///
/// `id` and `created_at` are always assigned by the store and never taken
/// from client input. The serialized field names are part of the cache
/// payload format and the HTTP contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from its store-generated fields and a validated payload.
    pub fn from_new(id: TaskId, created_at: DateTime<Utc>, new: NewTask) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            completed: new.completed,
            created_at,
        }
    }

    /// Applies a validated payload, keeping `id` and `created_at`.
    pub fn apply(&mut self, changes: &NewTask) {
        self.title = changes.title.clone();
        self.description = changes.description.clone();
        self.completed = changes.completed;
    }
}

/// Validated client-writable fields of a task.
///
/// Used for both inserts and full updates. Construct through the request
/// types in [`super::requests`] so the title is always validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl NewTask {
    /// Creates a payload with no description that is not completed.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}
