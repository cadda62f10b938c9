use std::fmt;

use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Failure of a single update strategy, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub cause: RepositoryError,
}

impl fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.cause)
    }
}

/// Top-level error for product operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Invalid update payload: {0}")]
    InvalidPayload(String),

    #[error("Product with ID {0} not found")]
    NotFound(String),

    #[error("Failed to update product after multiple attempts")]
    UpdateFailed { attempts: Vec<StrategyFailure> },

    #[error("Database error: {0}")]
    Database(String),
}

impl ProductError {
    /// One-line summary of every failed strategy, in the order tried.
    pub fn attempt_summary(&self) -> Option<String> {
        match self {
            ProductError::UpdateFailed { attempts } => Some(
                attempts
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        }
    }
}

impl From<RepositoryError> for ProductError {
    fn from(err: RepositoryError) -> Self {
        ProductError::Database(err.to_string())
    }
}
