pub mod errors;
pub mod ports;
pub mod value_objects;

pub use errors::StorageError;
pub use ports::{CleanupRecorder, NoOpCleanupRecorder, StorageGateway};
pub use value_objects::{CleanupReport, FileRef, OrphanedFiles, Visibility};
