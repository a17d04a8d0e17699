use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::deletion::{DeletionCoordinator, DeletionError};

#[derive(Debug, Deserialize)]
pub struct DeleteUserCommand {
  pub user_id: Uuid,
  pub requester_id: Uuid,
}

pub struct DeleteUserUseCase {
  coordinator: Arc<DeletionCoordinator>,
}

impl DeleteUserUseCase {
  pub fn new(coordinator: Arc<DeletionCoordinator>) -> Self {
    Self { coordinator }
  }

  pub async fn execute(&self, command: DeleteUserCommand) -> Result<(), DeletionError> {
    self
      .coordinator
      .delete_user(command.user_id, command.requester_id)
      .await?;
    Ok(())
  }
}
