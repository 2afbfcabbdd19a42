//! Pure mapping from repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// Missing records are a client problem (404). An unreachable store is
/// 503 and a failed query 500.
///
/// # Examples
///
/// ```
/// use festival_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::event_not_found(1);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
    }
}
