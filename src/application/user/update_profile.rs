use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{PersonName, ProfileUpdate, UserError, UserService};

use super::dto::UserDto;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileCommand {
  pub user_id: Uuid,
  pub requester_id: Uuid,
  pub name: String,
  pub headline: Option<String>,
  pub address: Option<String>,
  pub bio: Option<String>,
}

pub struct UpdateProfileUseCase {
  user_service: Arc<UserService>,
}

impl UpdateProfileUseCase {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  pub async fn execute(&self, command: UpdateProfileCommand) -> Result<UserDto, UserError> {
    let update = ProfileUpdate {
      name: PersonName::new(command.name)?,
      headline: command.headline,
      address: command.address,
      bio: command.bio,
    };

    let user = self
      .user_service
      .update_profile(command.user_id, command.requester_id, update)
      .await?;
    Ok(user.into())
  }
}
