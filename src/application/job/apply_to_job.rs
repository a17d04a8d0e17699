use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::job::{JobError, JobService, ValueObjectError};

use super::dto::JobDto;

#[derive(Debug, Deserialize)]
pub struct ApplyToJobCommand {
  pub job_id: Uuid,
  pub requester_id: Uuid,
  /// Key of the resume already uploaded to private storage
  pub resume: String,
}

pub struct ApplyToJobUseCase {
  job_service: Arc<JobService>,
}

impl ApplyToJobUseCase {
  pub fn new(job_service: Arc<JobService>) -> Self {
    Self { job_service }
  }

  pub async fn execute(&self, command: ApplyToJobCommand) -> Result<JobDto, JobError> {
    let resume = command.resume.trim().to_string();
    if resume.is_empty() {
      return Err(ValueObjectError::MissingField("resume".to_string()).into());
    }

    let job = self
      .job_service
      .apply_to_job(command.job_id, command.requester_id, resume)
      .await?;
    Ok(job.into())
  }
}
