use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("File not found: {0}")]
  NotFound(String),

  #[error("Invalid file key: {0}")]
  InvalidKey(String),

  #[error("Storage I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Storage backend error: {0}")]
  Backend(String),
}
