//! Process-local repositories for tests and the `memory` persistence backend.
//!
//! Each aggregate operation runs under one write lock acquisition, so two concurrent
//! deletes of the same aggregate cannot both succeed.

pub mod job_repository;
pub mod user_repository;

pub use job_repository::InMemoryJobRepository;
pub use user_repository::InMemoryUserRepository;
