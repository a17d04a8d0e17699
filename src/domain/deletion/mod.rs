pub mod errors;
pub mod services;

pub use errors::DeletionError;
pub use services::DeletionCoordinator;
