use std::sync::Arc;

use crate::domain::user::{Email, UserError, UserService};

#[derive(Debug, Clone)]
pub struct ForgotPasswordCommand {
  pub email: String,
}

/// Carries the raw token to whatever delivers it to the account owner
#[derive(Debug, Clone)]
pub struct ForgotPasswordResponse {
  pub token: String,
}

pub struct ForgotPasswordUseCase {
  user_service: Arc<UserService>,
}

impl ForgotPasswordUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(
    &self,
    command: ForgotPasswordCommand,
  ) -> Result<ForgotPasswordResponse, UserError> {
    let email = Email::new(command.email)?;
    let token = self.user_service.forgot_password(&email).await?;
    Ok(ForgotPasswordResponse {
      token: token.as_str().to_string(),
    })
  }
}
