use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Duration;

use crate::domain::account::errors::LoginError;
use crate::domain::account::errors::RegistrationError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Account directory: registration and login.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    session_ttl: Duration,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing
    /// * `session_ttl` - Lifetime of tokens issued at login
    pub fn new(
        repository: Arc<AR>,
        authenticator: Arc<Authenticator>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            session_ttl,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<Account, RegistrationError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(RegistrationError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| RegistrationError::PasswordHashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            password_hash,
            role: command.role,
        };

        let created = self.repository.insert(account).await?;

        tracing::info!(
            account_id = %created.id,
            username = %created.username,
            role = %created.role,
            "Account registered"
        );

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session, LoginError> {
        // A username that cannot be valid cannot exist either.
        let Ok(username) = Username::new(username) else {
            self.authenticator.verify_unknown_account(password);
            return Err(LoginError::AuthFailed);
        };

        let Some(account) = self.repository.find_by_username(&username).await? else {
            self.authenticator.verify_unknown_account(password);
            tracing::debug!(username = %username, "Login rejected");
            return Err(LoginError::AuthFailed);
        };

        let claims = Claims::for_account(&account.id, account.role, self.session_ttl);

        let result = self
            .authenticator
            .authenticate(password, &account.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(username = %username, "Login rejected");
                    LoginError::AuthFailed
                }
                AuthenticationError::JwtError(err) => LoginError::TokenIssuance(err.to_string()),
            })?;

        tracing::info!(account_id = %account.id, role = %account.role, "Session issued");

        Ok(Session {
            token: result.access_token,
            role: account.role,
        })
    }
}
