pub mod apply_to_job;
pub mod create_job;
pub mod delete_job;
pub mod dto;
pub mod list_applied_jobs;
pub mod list_jobs;
pub mod list_published_jobs;
pub mod show_job;
pub mod update_job;

pub use apply_to_job::{ApplyToJobCommand, ApplyToJobUseCase};
pub use create_job::{CreateJobCommand, CreateJobUseCase};
pub use delete_job::{DeleteJobCommand, DeleteJobUseCase};
pub use dto::{JobDto, JobFields, PagingParams};
pub use list_applied_jobs::{ListAppliedJobsCommand, ListAppliedJobsUseCase};
pub use list_jobs::{ListJobsCommand, ListJobsUseCase};
pub use list_published_jobs::{ListPublishedJobsCommand, ListPublishedJobsUseCase};
pub use show_job::{ShowJobCommand, ShowJobUseCase};
pub use update_job::{UpdateJobCommand, UpdateJobUseCase};
