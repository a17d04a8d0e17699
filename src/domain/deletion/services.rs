//! Cross-aggregate deletion.
//!
//! Removing the aggregate is the consistency-critical step and runs as a single atomic
//! repository call. Releasing the files it leaves behind happens afterwards and is
//! best-effort: a failed release is logged and recorded, never reported to the caller.

use futures_util::future::join_all;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{JobError, JobRepository};
use crate::domain::storage::{CleanupRecorder, CleanupReport, OrphanedFiles, StorageGateway};
use crate::domain::user::{UserError, UserRepository};

use super::errors::DeletionError;

pub struct DeletionCoordinator {
  job_repo: Arc<dyn JobRepository>,
  user_repo: Arc<dyn UserRepository>,
  storage: Arc<dyn StorageGateway>,
  recorder: Arc<dyn CleanupRecorder>,
}

impl DeletionCoordinator {
  pub fn new(
    job_repo: Arc<dyn JobRepository>,
    user_repo: Arc<dyn UserRepository>,
    storage: Arc<dyn StorageGateway>,
    recorder: Arc<dyn CleanupRecorder>,
  ) -> Self {
    Self {
      job_repo,
      user_repo,
      storage,
      recorder,
    }
  }

  /// Deletes a job with its applications, then releases their resumes.
  ///
  /// A missing job is reported before ownership is checked.
  pub async fn delete_job(
    &self,
    job_id: Uuid,
    requester_id: Uuid,
  ) -> Result<CleanupReport, DeletionError> {
    let job = self
      .job_repo
      .find_by_id(job_id)
      .await?
      .ok_or(JobError::JobNotFound(job_id))?;

    if !job.is_owned_by(requester_id) {
      return Err(DeletionError::Forbidden(
        "You can only delete your own jobs".to_string(),
      ));
    }

    let orphans = self.job_repo.delete(job_id).await?;
    tracing::info!(job_id = %job_id, orphaned_files = orphans.len(), "Job deleted");

    let report = self.release(orphans).await;
    self.recorder.record("job", &report);
    Ok(report)
  }

  /// Deletes an account and the user's applications, then releases the avatar and
  /// resumes. Jobs the user posted are left in place.
  ///
  /// Authorization is checked before any lookup. Once the account is gone its avatar
  /// is always released, even when removing the applications fails. Deleting an
  /// account that no longer exists still sweeps applications left behind by an
  /// earlier, interrupted deletion before reporting `UserNotFound`.
  pub async fn delete_user(
    &self,
    user_id: Uuid,
    requester_id: Uuid,
  ) -> Result<CleanupReport, DeletionError> {
    if user_id != requester_id {
      return Err(DeletionError::Forbidden(
        "You can only delete your own account".to_string(),
      ));
    }

    let mut orphans = match self.user_repo.delete(user_id).await {
      Ok(avatar) => avatar,
      Err(UserError::UserNotFound(id)) => {
        self.sweep_leftover_applications(id).await?;
        return Err(UserError::UserNotFound(id).into());
      }
      Err(e) => return Err(e.into()),
    };

    let resumes = match self.job_repo.remove_applications_by_user(user_id).await {
      Ok(resumes) => resumes,
      Err(e) => {
        tracing::error!(
          user_id = %user_id,
          error = %e,
          "User deleted but removing their applications failed"
        );
        let report = self.release(orphans).await;
        self.recorder.record("user", &report);
        return Err(e.into());
      }
    };
    tracing::info!(
      user_id = %user_id,
      avatars = orphans.len(),
      resumes = resumes.len(),
      "User deleted"
    );
    orphans.merge(resumes);

    let report = self.release(orphans).await;
    self.recorder.record("user", &report);
    Ok(report)
  }

  async fn sweep_leftover_applications(&self, user_id: Uuid) -> Result<(), DeletionError> {
    let leftovers = self.job_repo.remove_applications_by_user(user_id).await?;
    if leftovers.is_empty() {
      return Ok(());
    }

    tracing::warn!(
      user_id = %user_id,
      resumes = leftovers.len(),
      "Removed applications left by an interrupted user deletion"
    );
    let report = self.release(leftovers).await;
    self.recorder.record("user", &report);
    Ok(())
  }

  async fn release(&self, orphans: OrphanedFiles) -> CleanupReport {
    let attempts = orphans.into_iter().map(|file| async move {
      let outcome = self.storage.delete(&file.key, file.visibility).await;
      (file, outcome)
    });

    let mut report = CleanupReport::default();
    for (file, outcome) in join_all(attempts).await {
      match outcome {
        Ok(()) => {
          tracing::debug!(file = %file, "Released orphaned file");
          report.released.push(file);
        }
        Err(e) => {
          tracing::warn!(file = %file, error = %e, "Failed to release orphaned file");
          report.failed.push(file);
        }
      }
    }
    report
  }
}
