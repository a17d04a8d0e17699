use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{JobError, JobService};

use super::dto::{JobDto, JobFields};

#[derive(Debug, Deserialize)]
pub struct UpdateJobCommand {
  pub job_id: Uuid,
  pub requester_id: Uuid,
  pub fields: JobFields,
}

pub struct UpdateJobUseCase {
  job_service: Arc<JobService>,
}

impl UpdateJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(&self, command: UpdateJobCommand) -> Result<JobDto, JobError> {
    let update = command.fields.into_update()?;
    let job = self
      .job_service
      .update_job(command.job_id, command.requester_id, update)
      .await?;
    Ok(job.into())
  }
}
