use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::storage::OrphanedFiles;

use super::entities::User;
use super::errors::UserError;
use super::value_objects::{Email, Password, PasswordHash, ResetToken, TokenHash};

/// Repository trait for user account persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError>;

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserError>;

  async fn find_by_reset_token(&self, token_hash: &TokenHash) -> Result<Option<User>, UserError>;

  /// Fails with `UserError::EmailAlreadyExists` when the email is taken
  async fn create(&self, user: User) -> Result<User, UserError>;

  async fn update(&self, user: User) -> Result<User, UserError>;

  /// Atomically removes the account and returns its avatar file, if any.
  ///
  /// Fails with `UserError::UserNotFound` when the account does not exist.
  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, UserError>;
}

/// Salted one-way password hashing
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, UserError>;
}

/// Source of unguessable password reset tokens
#[async_trait]
pub trait TokenGenerator: Send + Sync {
  async fn generate(&self) -> Result<ResetToken, UserError>;
}
