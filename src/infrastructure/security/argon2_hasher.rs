use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version, password_hash::PasswordHasher as Argon2PasswordHasherTrait,
};
use async_trait::async_trait;

use crate::domain::user::{Password, PasswordHash, PasswordHasher, UserError};

/// Argon2id password hasher
///
/// Parameters: 19 MiB memory, 2 iterations, 1 lane, 32 byte output.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, UserError> {
    let memory_cost = 19456;
    let time_cost = 2;
    let parallelism = 1;
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len)
      .map_err(|e| UserError::Hash(format!("Failed to create Argon2 params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, UserError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| UserError::Hash(format!("Failed to hash password: {}", e)))?;

    PasswordHash::from_hash(hash.to_string())
      .map_err(|e| UserError::Hash(format!("Invalid hash format: {}", e)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use argon2::PasswordVerifier;
  use argon2::password_hash::PasswordHash as Argon2PasswordHash;

  #[tokio::test]
  async fn test_hash_password() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("test_password_123", 8).unwrap();

    let hash = hasher.hash(&password).await.unwrap();

    assert!(hash.as_str().starts_with("$argon2id$"));
    let parsed = Argon2PasswordHash::new(hash.as_str()).unwrap();
    assert_eq!(parsed.version, Some(Version::V0x13 as u32));
    assert!(
      Argon2::default()
        .verify_password(password.as_str().as_bytes(), &parsed)
        .is_ok()
    );
  }

  #[tokio::test]
  async fn test_hash_produces_different_salts() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("test_password_123", 8).unwrap();

    let hash1 = hasher.hash(&password).await.unwrap();
    let hash2 = hasher.hash(&password).await.unwrap();

    assert_ne!(hash1.as_str(), hash2.as_str());
  }
}
