use async_trait::async_trait;

use crate::domain::account::errors::LoginError;
use crate::domain::account::errors::RegistrationError;
use crate::domain::account::models::Account;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;
use crate::domain::errors::RepositoryError;

/// Port for account directory operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username, plaintext password and role
    ///
    /// # Returns
    /// Created account entity (password already hashed)
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `PasswordHashing` - Hashing the password failed
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, RegistrationError>;

    /// Authenticate by username and password and issue a session token.
    ///
    /// # Errors
    /// * `AuthFailed` - Unknown username or wrong password (indistinguishable)
    /// * `TokenIssuance` - Signing the token failed
    /// * `Database` - Store operation failed
    async fn login(&self, username: &str, password: &str) -> Result<Session, LoginError>;
}

/// Persistence operations for the account collection.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Insert a new account.
    ///
    /// # Errors
    /// * `Duplicate` - Username (or id) already present
    /// * `Database` - Store operation failed
    async fn insert(&self, account: Account) -> Result<Account, RepositoryError>;

    /// Query by the exact `username` field.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, RepositoryError>;
}
