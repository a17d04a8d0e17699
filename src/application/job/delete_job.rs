use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::deletion::{DeletionCoordinator, DeletionError};

#[derive(Debug, Deserialize)]
pub struct DeleteJobCommand {
  pub job_id: Uuid,
  pub requester_id: Uuid,
}

pub struct DeleteJobUseCase {
  coordinator: Arc<DeletionCoordinator>,
}

impl DeleteJobUseCase {
  pub fn new(coordinator: Arc<DeletionCoordinator>) -> Self {
    Self { coordinator }
  }

  /// Succeeds once the job is gone, whatever happened to its files
  pub async fn execute(&self, command: DeleteJobCommand) -> Result<(), DeletionError> {
    self
      .coordinator
      .delete_job(command.job_id, command.requester_id)
      .await?;
    Ok(())
  }
}
