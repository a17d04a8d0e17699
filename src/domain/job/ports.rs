use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::storage::OrphanedFiles;

use super::entities::Job;
use super::errors::JobError;
use super::query::JobFilter;

#[async_trait]
pub trait JobRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobError>;

  /// Every job satisfying all criteria present in `filter`, in no particular order
  async fn find_all_matching(&self, filter: &JobFilter) -> Result<Vec<Job>, JobError>;

  async fn create(&self, job: Job) -> Result<Job, JobError>;

  /// Replaces the mutable fields of a job; applications are left untouched
  async fn update(&self, job: Job) -> Result<Job, JobError>;

  /// Atomically removes the job with its applications and returns their resume files.
  ///
  /// Fails with `JobError::JobNotFound` when the job does not exist, including when a
  /// concurrent delete removed it first.
  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, JobError>;

  /// Records an application; fails with `JobError::AlreadyApplied` for a duplicate
  async fn apply(
    &self,
    job_id: Uuid,
    user_id: Uuid,
    resume: String,
    applied_at: DateTime<Utc>,
  ) -> Result<(), JobError>;

  /// Removes every application submitted by the user and returns their resume files
  async fn remove_applications_by_user(&self, user_id: Uuid) -> Result<OrphanedFiles, JobError>;
}
