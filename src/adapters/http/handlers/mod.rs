pub mod jobs;
pub mod system;
pub mod users;

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::adapters::http::{errors::ApiError, middleware::IdentityExt};

/// Caller id attached by `IdentityMiddleware`
pub fn requester_id(req: &HttpRequest) -> Result<Uuid, ApiError> {
  match req.authenticated_user() {
    Some(user) => Ok(user.id()),
    None => {
      tracing::debug!("No authenticated user for {} {}", req.method(), req.path());
      Err(ApiError::Unauthorized(
        "Missing or invalid identity header".to_string(),
      ))
    }
  }
}
