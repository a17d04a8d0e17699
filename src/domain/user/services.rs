use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{NewUser, ProfileUpdate, User};
use super::errors::UserError;
use super::ports::{PasswordHasher, TokenGenerator, UserRepository};
use super::value_objects::{Email, Password, PersonName, ResetToken, Role};

/// Password rules, taken from the `security` configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityPolicy {
  pub password_min_length: usize,
  pub reset_token_ttl: Duration,
}

impl Default for SecurityPolicy {
  fn default() -> Self {
    Self {
      password_min_length: 8,
      reset_token_ttl: Duration::seconds(1800),
    }
  }
}

/// Account management: registration, profile edits and password reset
pub struct UserService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  policy: SecurityPolicy,
}

impl UserService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    policy: SecurityPolicy,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      token_generator,
      policy,
    }
  }

  /// Registers a new account
  ///
  /// # Errors
  /// Returns `UserError::EmailAlreadyExists` if the email is already registered
  pub async fn register(
    &self,
    name: PersonName,
    email: Email,
    password: String,
    role: Role,
    avatar: Option<String>,
  ) -> Result<User, UserError> {
    let password = Password::new(password, self.policy.password_min_length)?;

    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(UserError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = User::new(
      NewUser {
        name,
        email,
        password_hash,
        role,
        avatar,
      },
      Utc::now(),
    );

    let created = self.user_repo.create(user).await?;
    tracing::info!(user_id = %created.id, role = %created.role, "User registered");
    Ok(created)
  }

  pub async fn show_user(&self, id: Uuid) -> Result<User, UserError> {
    self
      .user_repo
      .find_by_id(id)
      .await?
      .ok_or(UserError::UserNotFound(id))
  }

  /// Only the account owner may edit a profile; that check precedes the lookup
  pub async fn update_profile(
    &self,
    id: Uuid,
    requester_id: Uuid,
    update: ProfileUpdate,
  ) -> Result<User, UserError> {
    if id != requester_id {
      return Err(UserError::Forbidden(
        "You can only update your own profile".to_string(),
      ));
    }

    let mut user = self.show_user(id).await?;
    user.update_profile(update, Utc::now());
    self.user_repo.update(user).await
  }

  /// Issues a reset token for the account and stores only its hash.
  ///
  /// The raw token is returned so the caller can deliver it out of band.
  pub async fn forgot_password(&self, email: &Email) -> Result<ResetToken, UserError> {
    let mut user = self
      .user_repo
      .find_by_email(email)
      .await?
      .ok_or_else(|| UserError::EmailNotFound(email.to_string()))?;

    let token = self.token_generator.generate().await?;
    user.issue_reset_token(token.hash(), Utc::now() + self.policy.reset_token_ttl);
    self.user_repo.update(user).await?;

    tracing::info!(email = %email, "Password reset token issued");
    Ok(token)
  }

  pub async fn reset_password(
    &self,
    token: &ResetToken,
    password: String,
    confirm_password: &str,
  ) -> Result<(), UserError> {
    let password = Password::confirmed(
      password,
      confirm_password,
      self.policy.password_min_length,
    )?;

    let token_hash = token.hash();
    let now = Utc::now();
    let mut user = self
      .user_repo
      .find_by_reset_token(&token_hash)
      .await?
      .filter(|user| user.has_valid_reset_token(&token_hash, now))
      .ok_or(UserError::InvalidResetToken)?;

    let password_hash = self.password_hasher.hash(&password).await?;
    user.change_password(password_hash, now);
    let user = self.user_repo.update(user).await?;

    tracing::info!(user_id = %user.id, "Password reset");
    Ok(())
  }
}
