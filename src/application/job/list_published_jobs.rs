use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{CollectionResponse, JobError, JobService};

use super::dto::{JobDto, PagingParams};

#[derive(Debug, Deserialize)]
pub struct ListPublishedJobsCommand {
  pub owner_id: Uuid,
  #[serde(flatten)]
  pub paging: PagingParams,
}

pub struct ListPublishedJobsUseCase {
  job_service: Arc<JobService>,
}

impl ListPublishedJobsUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(
    &self,
    command: ListPublishedJobsCommand,
  ) -> Result<CollectionResponse<JobDto>, JobError> {
    let (page, sort) = command
      .paging
      .parse(self.job_service.pagination_limits())?;
    let jobs = self
      .job_service
      .list_published_jobs(command.owner_id, Some(page), sort)
      .await?;
    Ok(jobs.map(JobDto::from))
  }
}
