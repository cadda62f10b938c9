use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session
/// token handling.
///
/// Built once at startup from the configured signing secret and shared
/// read-only across requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Spend a full verification on a credential with no stored digest.
    ///
    /// Always returns `false`.
    pub fn verify_unknown_account(&self, password: &str) -> bool {
        self.password_hasher.verify_dummy(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password digest
    /// * `claims` - Claims to sign on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or digest is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a session token for an account without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        account_id: &str,
        role: &str,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        self.jwt_handler.encode(&Claims::for_account(account_id, role, ttl))
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch or malformed token
    /// * `TokenExpired` - Token lifetime elapsed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
