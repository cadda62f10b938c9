use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed digest with default parameters that no password matches.
///
/// Verifying against it costs the same as verifying a real stored digest.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bi1hY2NvdW50IQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Salted one-way password hashing (Argon2id).
///
/// Digests are PHC strings carrying algorithm, parameters and salt, so
/// `verify` needs nothing but the stored string.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// Hashing the same plaintext twice yields two different digests.
    ///
    /// # Errors
    /// * `HashingFailed` - The Argon2 primitive rejected the input
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// The digest comparison is constant-time. A digest that cannot be parsed
    /// is a failed verification, not an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification that always fails.
    ///
    /// Used when there is no stored digest to check against, so a missing
    /// account takes as long to reject as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> bool {
        self.verify(password, DUMMY_HASH);
        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
