use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::job::{Job, JobError, JobFilter, JobRepository};
use crate::domain::storage::{FileRef, OrphanedFiles};

#[derive(Default)]
pub struct InMemoryJobRepository {
  jobs: RwLock<HashMap<Uuid, Job>>,
}

impl InMemoryJobRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobError> {
    Ok(self.jobs.read().await.get(&id).cloned())
  }

  async fn find_all_matching(&self, filter: &JobFilter) -> Result<Vec<Job>, JobError> {
    Ok(
      self
        .jobs
        .read()
        .await
        .values()
        .filter(|job| filter.matches(job))
        .cloned()
        .collect(),
    )
  }

  async fn create(&self, job: Job) -> Result<Job, JobError> {
    let mut jobs = self.jobs.write().await;
    if jobs.contains_key(&job.id) {
      return Err(JobError::Repository(format!("Job {} already exists", job.id)));
    }
    jobs.insert(job.id, job.clone());
    Ok(job)
  }

  async fn update(&self, job: Job) -> Result<Job, JobError> {
    let mut jobs = self.jobs.write().await;
    let stored = jobs.get_mut(&job.id).ok_or(JobError::JobNotFound(job.id))?;

    let applications = std::mem::take(&mut stored.applications);
    *stored = Job {
      applications,
      posted_at: stored.posted_at,
      ..job
    };
    Ok(stored.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, JobError> {
    let removed = self
      .jobs
      .write()
      .await
      .remove(&id)
      .ok_or(JobError::JobNotFound(id))?;
    Ok(removed.resume_files())
  }

  async fn apply(
    &self,
    job_id: Uuid,
    user_id: Uuid,
    resume: String,
    applied_at: DateTime<Utc>,
  ) -> Result<(), JobError> {
    let mut jobs = self.jobs.write().await;
    let job = jobs.get_mut(&job_id).ok_or(JobError::JobNotFound(job_id))?;
    job.apply(user_id, resume, applied_at)
  }

  async fn remove_applications_by_user(&self, user_id: Uuid) -> Result<OrphanedFiles, JobError> {
    let mut jobs = self.jobs.write().await;
    Ok(
      jobs
        .values_mut()
        .filter_map(|job| job.remove_application(user_id))
        .map(|application| FileRef::private(application.resume))
        .collect(),
    )
  }
}
