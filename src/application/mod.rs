//! Application layer
//!
//! One use case per operation. Use cases turn raw commands into domain values and
//! delegate to the domain services.

pub mod job;
pub mod user;
