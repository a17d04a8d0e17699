pub mod deletion;
pub mod job;
pub mod storage;
pub mod user;
