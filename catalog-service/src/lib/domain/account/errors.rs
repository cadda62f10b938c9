use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username must not contain whitespace")]
    ContainsWhitespace,
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role '{0}' (expected 'admin' or 'consumer')")]
    Unknown(String),
}

/// Failure to register a new account.
///
/// Every variant but `Database` is a client error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepositoryError> for RegistrationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(username) => {
                RegistrationError::UsernameAlreadyExists(username)
            }
            other => RegistrationError::Database(other.to_string()),
        }
    }
}

/// Failure to log in.
///
/// `AuthFailed` covers both an unknown username and a wrong password; the
/// two must stay indistinguishable to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login failed.")]
    AuthFailed,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepositoryError> for LoginError {
    fn from(err: RepositoryError) -> Self {
        LoginError::Database(err.to_string())
    }
}
