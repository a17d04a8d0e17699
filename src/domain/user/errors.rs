use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum UserError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("User not found: {0}")]
  UserNotFound(Uuid),

  #[error("No account registered for {0}")]
  EmailNotFound(String),

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Password reset token is invalid or has expired")]
  InvalidResetToken,

  #[error("Hash error: {0}")]
  Hash(String),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl UserError {
  /// Whether the failure came from infrastructure rather than the request
  pub fn is_infrastructure(&self) -> bool {
    matches!(
      self,
      UserError::Hash(_) | UserError::Repository(_) | UserError::Database(_)
    )
  }
}
