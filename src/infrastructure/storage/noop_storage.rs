use async_trait::async_trait;

use crate::domain::storage::{StorageError, StorageGateway, Visibility};

/// Storage adapter for deployments where uploads are managed elsewhere
pub struct NoOpStorage;

impl NoOpStorage {
  pub fn new() -> Self {
    Self
  }
}

impl Default for NoOpStorage {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl StorageGateway for NoOpStorage {
  async fn delete(&self, key: &str, visibility: Visibility) -> Result<(), StorageError> {
    tracing::debug!(
      key,
      visibility = visibility.as_str(),
      "NoOpStorage: skipping file removal (no storage configured)"
    );
    Ok(())
  }
}
