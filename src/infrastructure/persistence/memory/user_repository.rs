use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::storage::OrphanedFiles;
use crate::domain::user::{Email, TokenHash, User, UserError, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
    Ok(self.users.read().await.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserError> {
    Ok(
      self
        .users
        .read()
        .await
        .values()
        .find(|user| user.email == *email)
        .cloned(),
    )
  }

  async fn find_by_reset_token(&self, token_hash: &TokenHash) -> Result<Option<User>, UserError> {
    Ok(
      self
        .users
        .read()
        .await
        .values()
        .find(|user| user.reset_token_hash.as_ref() == Some(token_hash))
        .cloned(),
    )
  }

  async fn create(&self, user: User) -> Result<User, UserError> {
    let mut users = self.users.write().await;
    if users.values().any(|existing| existing.email == user.email) {
      return Err(UserError::EmailAlreadyExists);
    }
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn update(&self, user: User) -> Result<User, UserError> {
    let mut users = self.users.write().await;
    if users
      .values()
      .any(|existing| existing.id != user.id && existing.email == user.email)
    {
      return Err(UserError::EmailAlreadyExists);
    }
    let stored = users.get_mut(&user.id).ok_or(UserError::UserNotFound(user.id))?;
    *stored = user.clone();
    Ok(user)
  }

  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, UserError> {
    let removed = self
      .users
      .write()
      .await
      .remove(&id)
      .ok_or(UserError::UserNotFound(id))?;
    Ok(removed.avatar_file().into_iter().collect())
  }
}
