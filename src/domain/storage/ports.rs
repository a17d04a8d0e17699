use async_trait::async_trait;

use super::errors::StorageError;
use super::value_objects::{CleanupReport, Visibility};

/// Deletes previously stored files (resumes, avatars)
#[async_trait]
pub trait StorageGateway: Send + Sync {
  async fn delete(&self, key: &str, visibility: Visibility) -> Result<(), StorageError>;
}

/// Receives the outcome of every best-effort cleanup run
pub trait CleanupRecorder: Send + Sync {
  fn record(&self, aggregate: &'static str, report: &CleanupReport);
}

pub struct NoOpCleanupRecorder;

impl CleanupRecorder for NoOpCleanupRecorder {
  fn record(&self, _aggregate: &'static str, _report: &CleanupReport) {}
}
