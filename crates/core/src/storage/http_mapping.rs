//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidData` -> 400 (Bad Request)
/// - `ConnectionFailed`, `QueryFailed`, `Serialization` -> 500 (Internal Server Error)
///
/// Store outages surface as 500 rather than 503; every store failure is a
/// server error to the caller.
///
/// # Examples
///
/// ```
/// use taskstack_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::task_not_found(12);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
    }
}
