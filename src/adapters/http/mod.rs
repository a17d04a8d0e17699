pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use dtos::{ErrorResponse, JobCollectionResponse};
pub use errors::ApiError;
pub use middleware::{AuthenticatedUser, IdentityMiddleware, RequestId, RequestIdMiddleware};
pub use routes::{
  JobRouteDependencies, UserRouteDependencies, configure_api_routes, configure_system_routes,
};
