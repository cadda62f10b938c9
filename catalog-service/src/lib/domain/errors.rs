use thiserror::Error;

/// Error reported by document store backed repositories.
///
/// Shared by every aggregate; each domain service translates it into its
/// own error taxonomy at the operation boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Document already exists: {0}")]
    Duplicate(String),

    #[error("Document not found: {0}")]
    Missing(String),

    #[error("Stored document could not be read: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(String),
}
