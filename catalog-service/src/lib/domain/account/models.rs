use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::account::errors::RegistrationError;
use crate::domain::account::errors::RoleError;
use crate::domain::account::errors::UsernameError;

/// Registered account.
///
/// Created on registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
}

/// Opaque account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    /// Generate a new random account ID.
    ///
    /// # Returns
    /// AccountId holding a UUID v4 in text form
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier read from storage or from a session token.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Trimmed, non-empty, at most 64 characters and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is blank
    /// * `TooLong` - Username longer than 64 characters
    /// * `ContainsWhitespace` - Username has inner whitespace
    pub fn new(username: impl AsRef<str>) -> Result<Self, UsernameError> {
        let username = username.as_ref().trim();
        let length = username.chars().count();

        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else if username.chars().any(char::is_whitespace) {
            Err(UsernameError::ContainsWhitespace)
        } else {
            Ok(Self(username.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Consumer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Consumer => "consumer",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "consumer" => Ok(Role::Consumer),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new account with validated fields.
#[derive(Debug)]
pub struct RegisterAccountCommand {
    pub username: Username,
    pub password: String,
    pub role: Role,
}

impl RegisterAccountCommand {
    /// Validate raw registration input.
    ///
    /// # Errors
    /// * `InvalidUsername` - Username fails validation
    /// * `InvalidRole` - Role is neither "admin" nor "consumer"
    /// * `EmptyPassword` - Password is empty
    pub fn parse(
        username: &str,
        password: String,
        role: &str,
    ) -> Result<Self, RegistrationError> {
        let username = Username::new(username)?;
        let role = role.parse::<Role>()?;

        if password.is_empty() {
            return Err(RegistrationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password,
            role,
        })
    }
}

/// Issued session returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}
