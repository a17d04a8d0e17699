use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{CollectionResponse, JobError, JobService};

use super::dto::{JobDto, PagingParams};

#[derive(Debug, Deserialize)]
pub struct ListAppliedJobsCommand {
  pub user_id: Uuid,
  pub requester_id: Uuid,
  #[serde(flatten)]
  pub paging: PagingParams,
}

pub struct ListAppliedJobsUseCase {
  job_service: Arc<JobService>,
}

impl ListAppliedJobsUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(
    &self,
    command: ListAppliedJobsCommand,
  ) -> Result<CollectionResponse<JobDto>, JobError> {
    let (page, sort) = command
      .paging
      .parse(self.job_service.pagination_limits())?;
    let jobs = self
      .job_service
      .list_applied_jobs(command.user_id, command.requester_id, Some(page), sort)
      .await?;
    Ok(jobs.map(JobDto::from))
  }
}
