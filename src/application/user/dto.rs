use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::User;

/// Public view of an account; credentials and reset state are never exposed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  pub role: String,
  pub avatar: Option<String>,
  pub headline: Option<String>,
  pub address: Option<String>,
  pub bio: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name.as_str().to_string(),
      email: user.email.as_str().to_string(),
      role: user.role.as_str().to_string(),
      avatar: user.avatar,
      headline: user.headline,
      address: user.address,
      bio: user.bio,
      created_at: user.created_at,
    }
  }
}
