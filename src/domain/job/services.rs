use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{Role, User, UserRepository};

use super::entities::{Job, JobUpdate, NewJob};
use super::errors::JobError;
use super::ports::JobRepository;
use super::query::{
  CollectionResponse, JobFilter, JobQueryEngine, ListJobsQuery, PageRequest, PaginationLimits,
  SortSpec,
};

/// Posting lifecycle and applications
pub struct JobService {
  job_repo: Arc<dyn JobRepository>,
  user_repo: Arc<dyn UserRepository>,
  query_engine: Arc<JobQueryEngine>,
}

impl JobService {
  pub fn new(
    job_repo: Arc<dyn JobRepository>,
    user_repo: Arc<dyn UserRepository>,
    query_engine: Arc<JobQueryEngine>,
  ) -> Self {
    Self {
      job_repo,
      user_repo,
      query_engine,
    }
  }

  pub fn pagination_limits(&self) -> &PaginationLimits {
    self.query_engine.limits()
  }

  /// Publishes a posting on behalf of an employer
  ///
  /// # Errors
  /// Returns `JobError::Forbidden` if the requester is not an employer
  pub async fn create_job(&self, requester_id: Uuid, data: NewJob) -> Result<Job, JobError> {
    let requester = self.load_requester(requester_id).await?;
    if !requester.is_employer() {
      return Err(JobError::Forbidden(
        "Only employers can publish jobs".to_string(),
      ));
    }

    let job = Job::new(requester.id, data, Utc::now())?;
    let created = self.job_repo.create(job).await?;

    tracing::info!(job_id = %created.id, owner_id = %created.owner_id, "Job published");
    Ok(created)
  }

  pub async fn show_job(&self, job_id: Uuid) -> Result<Job, JobError> {
    self
      .job_repo
      .find_by_id(job_id)
      .await?
      .ok_or(JobError::JobNotFound(job_id))
  }

  /// Existence is checked before ownership
  pub async fn update_job(
    &self,
    job_id: Uuid,
    requester_id: Uuid,
    update: JobUpdate,
  ) -> Result<Job, JobError> {
    let mut job = self.show_job(job_id).await?;
    if !job.is_owned_by(requester_id) {
      return Err(JobError::Forbidden(
        "You can only update your own jobs".to_string(),
      ));
    }

    job.update(update)?;
    self.job_repo.update(job).await
  }

  pub async fn apply_to_job(
    &self,
    job_id: Uuid,
    requester_id: Uuid,
    resume: String,
  ) -> Result<Job, JobError> {
    let requester = self.load_requester(requester_id).await?;
    if requester.role != Role::User {
      return Err(JobError::Forbidden(
        "Only job seekers can apply to jobs".to_string(),
      ));
    }

    let job = self.show_job(job_id).await?;
    let now = Utc::now();
    if !job.is_open(now) {
      return Err(JobError::ApplicationClosed(job_id));
    }
    if job.has_applicant(requester_id) {
      return Err(JobError::AlreadyApplied {
        job_id,
        user_id: requester_id,
      });
    }

    self
      .job_repo
      .apply(job_id, requester_id, resume, now)
      .await?;

    tracing::info!(job_id = %job_id, user_id = %requester_id, "Application submitted");
    self.show_job(job_id).await
  }

  pub async fn list_published_jobs(
    &self,
    owner_id: Uuid,
    page: Option<PageRequest>,
    sort: SortSpec,
  ) -> Result<CollectionResponse<Job>, JobError> {
    self
      .query_engine
      .list(&ListJobsQuery {
        filter: JobFilter::posted_by(owner_id),
        page,
        sort,
      })
      .await
  }

  /// Applications are private to the applicant
  pub async fn list_applied_jobs(
    &self,
    user_id: Uuid,
    requester_id: Uuid,
    page: Option<PageRequest>,
    sort: SortSpec,
  ) -> Result<CollectionResponse<Job>, JobError> {
    if user_id != requester_id {
      return Err(JobError::Forbidden(
        "You can only list your own applications".to_string(),
      ));
    }

    self
      .query_engine
      .list(&ListJobsQuery {
        filter: JobFilter::applied_by(user_id),
        page,
        sort,
      })
      .await
  }

  async fn load_requester(&self, requester_id: Uuid) -> Result<User, JobError> {
    self
      .user_repo
      .find_by_id(requester_id)
      .await
      .map_err(|e| JobError::Repository(e.to_string()))?
      .ok_or(JobError::UserNotFound(requester_id))
  }
}
