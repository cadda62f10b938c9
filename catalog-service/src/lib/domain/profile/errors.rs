use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Top-level error for profile operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepositoryError> for ProfileError {
    fn from(err: RepositoryError) -> Self {
        ProfileError::Database(err.to_string())
    }
}
