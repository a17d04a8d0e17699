use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use crate::domain::user::{ResetToken, TokenGenerator, UserError};

/// Generates 32 random bytes from the OS RNG, encoded as unpadded base64url
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

impl Default for SecureTokenGenerator {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl TokenGenerator for SecureTokenGenerator {
  async fn generate(&self) -> Result<ResetToken, UserError> {
    let mut token_bytes = [0u8; 32];
    rand::rngs::OsRng
      .try_fill_bytes(&mut token_bytes)
      .map_err(|e| UserError::Hash(format!("Failed to generate token: {}", e)))?;

    Ok(ResetToken::new(URL_SAFE_NO_PAD.encode(token_bytes)))
  }
}
