//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
///
/// Every expected outcome of a request (bad input, unknown id, wrong secret)
/// is one of these; only storage and hashing faults end up as `Internal`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid reaction type: {0}")]
    InvalidKind(String),

    /// Secret verification failed. Carries no detail on purpose.
    #[error("Incorrect secret code. Access denied.")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_faults_are_internal() {
        for err in [
            RepoError::Connection("refused".to_owned()),
            RepoError::Constraint("post id taken".to_owned()),
            RepoError::NotFound,
        ] {
            assert!(matches!(DomainError::from(err), DomainError::Internal(_)));
        }
    }
}
