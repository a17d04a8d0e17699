use thiserror::Error;

use crate::domain::job::JobError;
use crate::domain::user::UserError;

#[derive(Debug, Error)]
pub enum DeletionError {
  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error(transparent)]
  Job(#[from] JobError),

  #[error(transparent)]
  User(#[from] UserError),
}

impl DeletionError {
  pub fn is_not_found(&self) -> bool {
    matches!(
      self,
      DeletionError::Job(JobError::JobNotFound(_)) | DeletionError::User(UserError::UserNotFound(_))
    )
  }
}
