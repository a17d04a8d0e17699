pub mod entities;
pub mod errors;
pub mod ports;
pub mod query;
pub mod services;
pub mod value_objects;

pub use entities::{Application, DEFAULT_OPEN_DAYS, Job, JobUpdate, NewJob};
pub use errors::JobError;
pub use ports::JobRepository;
pub use query::{
  CollectionResponse, JobFilter, JobQueryEngine, ListJobsQuery, PageRequest, PaginationLimits,
  SortField, SortOrder, SortSpec,
};
pub use services::JobService;
pub use value_objects::{
  ContactEmail, Education, Experience, Industry, JobDescription, JobTitle, JobType, Positions,
  Salary, Slug, ValueObjectError,
};
