use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::storage::{StorageError, StorageGateway, Visibility};

/// Files kept on the local filesystem, one root directory per visibility
pub struct DiskStorage {
  public_dir: PathBuf,
  private_dir: PathBuf,
}

impl DiskStorage {
  pub fn new(public_dir: impl Into<PathBuf>, private_dir: impl Into<PathBuf>) -> Self {
    Self {
      public_dir: public_dir.into(),
      private_dir: private_dir.into(),
    }
  }

  fn root(&self, visibility: Visibility) -> &Path {
    match visibility {
      Visibility::Public => &self.public_dir,
      Visibility::Private => &self.private_dir,
    }
  }

  /// Resolves a key inside its root; keys are plain file names
  fn resolve(&self, key: &str, visibility: Visibility) -> Result<PathBuf, StorageError> {
    let key = key.trim();
    if key.is_empty()
      || key == "."
      || key.contains("..")
      || key.contains('/')
      || key.contains('\\')
      || key.contains('\0')
    {
      return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(self.root(visibility).join(key))
  }
}

#[async_trait]
impl StorageGateway for DiskStorage {
  async fn delete(&self, key: &str, visibility: Visibility) -> Result<(), StorageError> {
    let path = self.resolve(key, visibility)?;

    match tokio::fs::remove_file(&path).await {
      Ok(()) => {
        tracing::debug!(path = %path.display(), "Removed stored file");
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
      Err(e) => Err(StorageError::Io(e)),
    }
  }
}
