use thiserror::Error;

/// Maximum title length, matching the `VARCHAR(255)` column.
pub const MAX_TITLE_LEN: usize = 255;

/// Errors raised while validating task payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task title too long (max 255 characters)")]
    TitleTooLong,
}
