use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{JobError, JobService};

use super::dto::{JobDto, JobFields};

#[derive(Debug, Deserialize)]
pub struct CreateJobCommand {
  pub requester_id: Uuid,
  pub fields: JobFields,
  pub expires_at: Option<DateTime<Utc>>,
}

pub struct CreateJobUseCase {
  job_service: Arc<JobService>,
}

impl CreateJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(&self, command: CreateJobCommand) -> Result<JobDto, JobError> {
    let data = command.fields.into_new_job(command.expires_at)?;
    let job = self
      .job_service
      .create_job(command.requester_id, data)
      .await?;
    Ok(job.into())
  }
}
