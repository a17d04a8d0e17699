use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::FileRef;

use super::value_objects::{Email, PasswordHash, PersonName, Role, TokenHash};

/// Data for a new account; the password has already been hashed
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name: PersonName,
  pub email: Email,
  pub password_hash: PasswordHash,
  pub role: Role,
  /// Key of an already uploaded avatar in public storage
  pub avatar: Option<String>,
}

/// Replacement values for the editable profile fields
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
  pub name: PersonName,
  pub headline: Option<String>,
  pub address: Option<String>,
  pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: PersonName,
  pub email: Email,
  pub password_hash: PasswordHash,
  pub role: Role,
  pub avatar: Option<String>,
  pub headline: Option<String>,
  pub address: Option<String>,
  pub bio: Option<String>,
  pub reset_token_hash: Option<TokenHash>,
  pub reset_token_expires_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(data: NewUser, now: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      name: data.name,
      email: data.email,
      password_hash: data.password_hash,
      role: data.role,
      avatar: data.avatar.filter(|key| !key.trim().is_empty()),
      headline: None,
      address: None,
      bio: None,
      reset_token_hash: None,
      reset_token_expires_at: None,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn is_employer(&self) -> bool {
    self.role == Role::Employer
  }

  pub fn update_profile(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
    self.name = update.name;
    self.headline = non_blank(update.headline);
    self.address = non_blank(update.address);
    self.bio = non_blank(update.bio);
    self.updated_at = now;
  }

  pub fn issue_reset_token(&mut self, hash: TokenHash, expires_at: DateTime<Utc>) {
    self.reset_token_hash = Some(hash);
    self.reset_token_expires_at = Some(expires_at);
  }

  pub fn has_valid_reset_token(&self, hash: &TokenHash, now: DateTime<Utc>) -> bool {
    match (&self.reset_token_hash, self.reset_token_expires_at) {
      (Some(stored), Some(expires_at)) => stored == hash && now <= expires_at,
      _ => false,
    }
  }

  /// Replaces the password and invalidates any outstanding reset token
  pub fn change_password(&mut self, hash: PasswordHash, now: DateTime<Utc>) {
    self.password_hash = hash;
    self.reset_token_hash = None;
    self.reset_token_expires_at = None;
    self.updated_at = now;
  }

  pub fn avatar_file(&self) -> Option<FileRef> {
    self.avatar.clone().map(FileRef::public)
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::storage::Visibility;
  use chrono::Duration;

  const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$S1GoZ7lzXbE5RmmHBhS9b4ahKcdb66PmfQmQmtsyCuo";

  fn new_user(avatar: Option<&str>) -> User {
    User::new(
      NewUser {
        name: PersonName::new("Jane Doe").unwrap(),
        email: Email::new("jane@example.com").unwrap(),
        password_hash: PasswordHash::from_hash(HASH).unwrap(),
        role: Role::User,
        avatar: avatar.map(str::to_string),
      },
      Utc::now(),
    )
  }

  #[test]
  fn test_avatar_is_public_file() {
    let user = new_user(Some("avatar.png"));
    let file = user.avatar_file().unwrap();

    assert_eq!(file.key, "avatar.png");
    assert_eq!(file.visibility, Visibility::Public);
    assert!(new_user(Some("  ")).avatar_file().is_none());
  }

  #[test]
  fn test_reset_token_validity() {
    let mut user = new_user(None);
    let now = Utc::now();
    let hash = TokenHash::from_stored("abc");

    assert!(!user.has_valid_reset_token(&hash, now));

    user.issue_reset_token(hash.clone(), now + Duration::minutes(30));
    assert!(user.has_valid_reset_token(&hash, now));
    assert!(!user.has_valid_reset_token(&TokenHash::from_stored("other"), now));
    assert!(!user.has_valid_reset_token(&hash, now + Duration::minutes(31)));

    user.change_password(PasswordHash::from_hash(HASH).unwrap(), now);
    assert!(user.reset_token_hash.is_none());
    assert!(!user.has_valid_reset_token(&hash, now));
  }

  #[test]
  fn test_update_profile_drops_blank_fields() {
    let mut user = new_user(None);
    user.update_profile(
      ProfileUpdate {
        name: PersonName::new("Jane Smith").unwrap(),
        headline: Some("Rust developer".to_string()),
        address: Some("   ".to_string()),
        bio: None,
      },
      Utc::now(),
    );

    assert_eq!(user.name.as_str(), "Jane Smith");
    assert_eq!(user.headline.as_deref(), Some("Rust developer"));
    assert!(user.address.is_none());
  }
}
