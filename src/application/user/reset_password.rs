use std::sync::Arc;

use crate::domain::user::{ResetToken, UserError, UserService};

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
  pub token: String,
  pub password: String,
  pub confirm_password: String,
}

pub struct ResetPasswordUseCase {
  user_service: Arc<UserService>,
}

impl ResetPasswordUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(&self, command: ResetPasswordCommand) -> Result<(), UserError> {
    let token = ResetToken::new(command.token);
    self
      .user_service
      .reset_password(&token, command.password, &command.confirm_password)
      .await
  }
}
