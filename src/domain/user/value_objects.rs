use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Name cannot be empty")]
  EmptyName,

  #[error("Name can not exceed {max} characters")]
  NameTooLong { max: usize },

  #[error("Password is too short (minimum {min} characters)")]
  PasswordTooShort { min: usize },

  #[error("Password is too long (maximum {max} characters)")]
  PasswordTooLong { max: usize },

  #[error("Passwords do not match")]
  PasswordMismatch,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid role: {0}")]
  InvalidRole(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Validates and lowercases an address; uniqueness is case-insensitive
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into().trim().to_string();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    Ok(Self(email.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
  const MAX_LENGTH: usize = 100;

  pub fn new(name: impl Into<String>) -> Result<Self, ValueObjectError> {
    let name = name.into();
    let trimmed = name.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::EmptyName);
    }
    if trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::NameTooLong {
        max: Self::MAX_LENGTH,
      });
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

/// Plain password, only ever held in memory on its way to the hasher
#[derive(Clone)]
pub struct Password(String);

impl Password {
  const MAX_LENGTH: usize = 128;

  pub fn new(password: impl Into<String>, min_length: usize) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.chars().count() < min_length {
      return Err(ValueObjectError::PasswordTooShort { min: min_length });
    }

    if password.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Validates a password together with its confirmation
  pub fn confirmed(
    password: impl Into<String>,
    confirmation: &str,
    min_length: usize,
  ) -> Result<Self, ValueObjectError> {
    let password = password.into();
    if password != confirmation {
      return Err(ValueObjectError::PasswordMismatch);
    }
    Self::new(password, min_length)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

/// Argon2 PHC string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();
    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;
    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Employer,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::User => "user",
      Role::Employer => "employer",
    }
  }
}

impl FromStr for Role {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "user" => Ok(Role::User),
      "employer" => Ok(Role::Employer),
      _ => Err(ValueObjectError::InvalidRole(s.to_string())),
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Raw password reset token handed to the account owner, never persisted
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(String);

impl ResetToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into())
  }

  pub fn hash(&self) -> TokenHash {
    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());
    TokenHash(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for ResetToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ResetToken(***)")
  }
}

/// SHA-256 hex digest of a reset token, the only form that is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn from_stored(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}
