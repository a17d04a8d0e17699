use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::storage::{FileRef, OrphanedFiles};
use crate::domain::user::{
  Email, PasswordHash, PersonName, Role, TokenHash, User, UserError, UserRepository,
};

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, role, avatar, headline, address, bio,
    reset_token_hash, reset_token_expires_at, created_at, updated_at
"#;

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  role: String,
  avatar: Option<String>,
  headline: Option<String>,
  address: Option<String>,
  bio: Option<String>,
  reset_token_hash: Option<String>,
  reset_token_expires_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = UserError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    let corrupt = |e: crate::domain::user::value_objects::ValueObjectError| {
      UserError::Repository(format!("Invalid user row {}: {}", row.id, e))
    };

    Ok(User {
      id: row.id,
      name: PersonName::new(row.name.clone()).map_err(corrupt)?,
      email: Email::new(row.email.clone()).map_err(corrupt)?,
      password_hash: PasswordHash::from_hash(row.password_hash.clone()).map_err(corrupt)?,
      role: Role::from_str(&row.role).map_err(corrupt)?,
      avatar: row.avatar.clone(),
      headline: row.headline.clone(),
      address: row.address.clone(),
      bio: row.bio.clone(),
      reset_token_hash: row.reset_token_hash.clone().map(TokenHash::from_stored),
      reset_token_expires_at: row.reset_token_expires_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

fn map_write_error(error: sqlx::Error) -> UserError {
  match error {
    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => UserError::EmailAlreadyExists,
    e => e.into(),
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, UserRow>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?
      .map(User::try_from)
      .transpose()
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
      USER_COLUMNS
    ))
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?
    .map(User::try_from)
    .transpose()
  }

  async fn find_by_reset_token(&self, token_hash: &TokenHash) -> Result<Option<User>, UserError> {
    sqlx::query_as::<_, UserRow>(&format!(
      "SELECT {} FROM users WHERE reset_token_hash = $1",
      USER_COLUMNS
    ))
    .bind(token_hash.as_str())
    .fetch_optional(&self.pool)
    .await?
    .map(User::try_from)
    .transpose()
  }

  async fn create(&self, user: User) -> Result<User, UserError> {
    sqlx::query(
      r#"
            INSERT INTO users (
                id, name, email, password_hash, role, avatar, headline, address, bio,
                reset_token_hash, reset_token_expires_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
    )
    .bind(user.id)
    .bind(user.name.as_str())
    .bind(user.email.as_str())
    .bind(user.password_hash.as_str())
    .bind(user.role.as_str())
    .bind(&user.avatar)
    .bind(&user.headline)
    .bind(&user.address)
    .bind(&user.bio)
    .bind(user.reset_token_hash.as_ref().map(TokenHash::as_str))
    .bind(user.reset_token_expires_at)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(&self.pool)
    .await
    .map_err(map_write_error)?;

    Ok(user)
  }

  async fn update(&self, user: User) -> Result<User, UserError> {
    let result = sqlx::query(
      r#"
            UPDATE users
            SET
                name = $2,
                email = $3,
                password_hash = $4,
                avatar = $5,
                headline = $6,
                address = $7,
                bio = $8,
                reset_token_hash = $9,
                reset_token_expires_at = $10,
                updated_at = $11
            WHERE id = $1
            "#,
    )
    .bind(user.id)
    .bind(user.name.as_str())
    .bind(user.email.as_str())
    .bind(user.password_hash.as_str())
    .bind(&user.avatar)
    .bind(&user.headline)
    .bind(&user.address)
    .bind(&user.bio)
    .bind(user.reset_token_hash.as_ref().map(TokenHash::as_str))
    .bind(user.reset_token_expires_at)
    .bind(user.updated_at)
    .execute(&self.pool)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
      return Err(UserError::UserNotFound(user.id));
    }
    Ok(user)
  }

  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, UserError> {
    let deleted: Option<(Option<String>,)> =
      sqlx::query_as("DELETE FROM users WHERE id = $1 RETURNING avatar")
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

    match deleted {
      Some((avatar,)) => Ok(
        avatar
          .into_iter()
          .map(FileRef::public)
          .collect(),
      ),
      None => Err(UserError::UserNotFound(id)),
    }
  }
}
