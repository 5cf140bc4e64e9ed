//! Pure functions for serializing/deserializing the task collection to/from cache bytes.
//!
//! # Payload format
//!
//! The cached collection is a UTF-8 JSON array of task objects, in listing
//! order (newest `created_at` first, then highest `id` first). Each object
//! has exactly these fields:
//!
//! | field         | JSON type        | notes                         |
//! |---------------|------------------|-------------------------------|
//! | `id`          | integer          | store-assigned                |
//! | `title`       | string           |                               |
//! | `description` | string or `null` |                               |
//! | `completed`   | boolean          |                               |
//! | `created_at`  | string           | RFC 3339, UTC                 |
//!
//! This matches the HTTP response body of `GET /tasks`, so a cache hit can
//! be returned without any reshaping.

use crate::task::Task;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes an ordered task collection to JSON bytes.
pub fn serialize_tasks(tasks: &[Task]) -> Result<Vec<u8>> {
    serde_json::to_vec(tasks).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an ordered task collection.
pub fn deserialize_tasks(bytes: &[u8]) -> Result<Vec<Task>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
