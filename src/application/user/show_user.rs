use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{UserError, UserService};

use super::dto::UserDto;

#[derive(Debug, Deserialize)]
pub struct ShowUserCommand {
  pub user_id: Uuid,
}

pub struct ShowUserUseCase {
  user_service: Arc<UserService>,
}

impl ShowUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(&self, command: ShowUserCommand) -> Result<UserDto, UserError> {
    let user = self.user_service.show_user(command.user_id).await?;
    Ok(user.into())
  }
}
