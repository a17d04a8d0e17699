use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum JobError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invalid query: {0}")]
  InvalidQuery(String),

  #[error("Job not found: {0}")]
  JobNotFound(Uuid),

  #[error("User not found: {0}")]
  UserNotFound(Uuid),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("User {user_id} already applied to job {job_id}")]
  AlreadyApplied { job_id: Uuid, user_id: Uuid },

  #[error("Job {0} no longer accepts applications")]
  ApplicationClosed(Uuid),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl JobError {
  /// Whether the failure came from the persistence layer rather than the request
  pub fn is_infrastructure(&self) -> bool {
    matches!(self, JobError::Repository(_) | JobError::Database(_))
  }
}
