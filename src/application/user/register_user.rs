use std::str::FromStr;
use std::sync::Arc;

use crate::domain::user::{Email, PersonName, Role, UserError, UserService};

use super::dto::UserDto;

/// Command for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub name: String,
  pub email: String,
  /// Plain text, hashed before it is stored
  pub password: String,
  /// `user` when absent
  pub role: Option<String>,
  pub avatar: Option<String>,
}

pub struct RegisterUserUseCase {
  user_service: Arc<UserService>,
}

impl RegisterUserUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  /// # Errors
  /// Returns `UserError` if validation fails or the email is already registered
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<UserDto, UserError> {
    let name = PersonName::new(command.name)?;
    let email = Email::new(command.email)?;
    let role = match command.role.as_deref() {
      Some(raw) => Role::from_str(raw)?,
      None => Role::default(),
    };

    let user = self
      .user_service
      .register(name, email, command.password, role, command.avatar)
      .await?;

    Ok(user.into())
  }
}
