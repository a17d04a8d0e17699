mod disk_storage;
mod noop_storage;

use std::sync::Arc;

use crate::domain::storage::StorageGateway;
use crate::infrastructure::config::{StorageBackend, StorageConfig};

pub use disk_storage::DiskStorage;
pub use noop_storage::NoOpStorage;

/// Builds the storage adapter selected in configuration
pub fn create_storage(config: &StorageConfig) -> Arc<dyn StorageGateway> {
  match config.backend {
    StorageBackend::Disk => {
      tracing::info!(
        public_dir = %config.public_dir.display(),
        private_dir = %config.private_dir.display(),
        "Using disk storage"
      );
      Arc::new(DiskStorage::new(&config.public_dir, &config.private_dir))
    }
    StorageBackend::Noop => {
      tracing::info!("Using NoOpStorage");
      Arc::new(NoOpStorage::new())
    }
  }
}
