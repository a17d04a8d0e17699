use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{JobError, JobService};

use super::dto::JobDto;

#[derive(Debug, Deserialize)]
pub struct ShowJobCommand {
  pub job_id: Uuid,
}

pub struct ShowJobUseCase {
  job_service: Arc<JobService>,
}

impl ShowJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(&self, command: ShowJobCommand) -> Result<JobDto, JobError> {
    let job = self.job_service.show_job(command.job_id).await?;
    Ok(job.into())
  }
}
