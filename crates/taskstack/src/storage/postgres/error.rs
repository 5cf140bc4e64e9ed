//! sqlx error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `taskstack_core::storage`.

use taskstack_core::storage::RepositoryError;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - `RowNotFound` → `RepositoryError::NotFound`
/// - Pool, IO and TLS errors → `RepositoryError::ConnectionFailed`
/// - Column/type decode errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound {
            entity_type,
            id: "unknown".to_string(),
        },
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_) => RepositoryError::ConnectionFailed(err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => RepositoryError::Serialization(err.to_string()),
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found() {
        let mapped = map_sqlx_error(sqlx::Error::RowNotFound, "Task");
        assert!(mapped.is_not_found());
    }

    #[test]
    fn test_pool_errors_are_connection_failures() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut, "Task"),
            RepositoryError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed, "Task"),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_io_error_is_connection_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Io(io), "Task"),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_column_not_found_is_serialization() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::ColumnNotFound("title".to_string()), "Task"),
            RepositoryError::Serialization(_)
        ));
    }

    #[test]
    fn test_protocol_error_is_query_failure() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Protocol("unexpected".to_string()), "Task"),
            RepositoryError::QueryFailed(_)
        ));
    }
}
