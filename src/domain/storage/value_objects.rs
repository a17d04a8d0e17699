use serde::{Deserialize, Serialize};
use std::fmt;

/// Which storage area a file lives in.
///
/// Avatars are served publicly, resumes are only reachable through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
  Public,
  Private,
}

impl Visibility {
  pub fn as_str(&self) -> &'static str {
    match self {
      Visibility::Public => "public",
      Visibility::Private => "private",
    }
  }

  pub fn is_public(&self) -> bool {
    matches!(self, Visibility::Public)
  }
}

/// Reference to a stored blob owned by the file store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
  pub key: String,
  pub visibility: Visibility,
}

impl FileRef {
  pub fn public(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      visibility: Visibility::Public,
    }
  }

  pub fn private(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      visibility: Visibility::Private,
    }
  }
}

impl fmt::Display for FileRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.visibility.as_str(), self.key)
  }
}

/// Files that no aggregate references any more after a deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanedFiles(Vec<FileRef>);

impl OrphanedFiles {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  /// Adds a file, ignoring empty keys
  pub fn push(&mut self, file: FileRef) {
    if !file.key.trim().is_empty() {
      self.0.push(file);
    }
  }

  pub fn merge(&mut self, other: OrphanedFiles) {
    for file in other {
      self.push(file);
    }
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &FileRef> {
    self.0.iter()
  }
}

impl FromIterator<FileRef> for OrphanedFiles {
  fn from_iter<I: IntoIterator<Item = FileRef>>(iter: I) -> Self {
    let mut files = OrphanedFiles::new();
    for file in iter {
      files.push(file);
    }
    files
  }
}

impl IntoIterator for OrphanedFiles {
  type Item = FileRef;
  type IntoIter = std::vec::IntoIter<FileRef>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

/// Outcome of releasing a batch of orphaned files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
  pub released: Vec<FileRef>,
  pub failed: Vec<FileRef>,
}

impl CleanupReport {
  pub fn attempted(&self) -> usize {
    self.released.len() + self.failed.len()
  }

  pub fn is_complete(&self) -> bool {
    self.failed.is_empty()
  }
}
