use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Tokens are stateless: everything needed to authorize a request is carried
/// here and checked against the signature and `exp` on every use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account role, e.g. "admin" or "consumer"
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an account session expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `account_id` - Unique account identifier
    /// * `role` - Role name embedded in the token
    /// * `ttl` - Session lifetime
    pub fn for_account(account_id: impl ToString, role: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: account_id.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// The expiry instant itself is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
