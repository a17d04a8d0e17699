use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    JobCollectionResponse, PagingQuery, RegisterRequest, ResetPasswordRequest, SuccessResponse,
    UpdateProfileRequest,
  },
  errors::ApiError,
};
use crate::application::job::{
  ListAppliedJobsCommand, ListAppliedJobsUseCase, ListPublishedJobsCommand,
  ListPublishedJobsUseCase,
};
use crate::application::user::{
  DeleteUserCommand, DeleteUserUseCase, RegisterUserCommand, RegisterUserUseCase,
  ResetPasswordCommand, ResetPasswordUseCase, ShowUserCommand, ShowUserUseCase,
  UpdateProfileCommand, UpdateProfileUseCase,
};

use super::requester_id;

/// Handler for user registration
///
/// POST /api/v1/users
/// Response: the new account with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    name: request.name,
    email: request.email,
    password: request.password,
    role: request.role,
    avatar: request.avatar,
  };

  let user = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(user))
}

/// GET /api/v1/users/{id}
pub async fn show_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ShowUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = use_case
    .execute(ShowUserCommand {
      user_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update_profile_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateProfileUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;
  request.validate()?;

  let request = request.into_inner();
  let command = UpdateProfileCommand {
    user_id: path.into_inner(),
    requester_id,
    name: request.name,
    headline: request.headline,
    address: request.address,
    bio: request.bio,
  };

  let user = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(user))
}

/// DELETE /api/v1/users/{id}
///
/// Removes the account and the user's applications. Jobs the user published stay.
pub async fn delete_user_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;

  use_case
    .execute(DeleteUserCommand {
      user_id: path.into_inner(),
      requester_id,
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/users/{id}/jobs
pub async fn list_published_jobs_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  query: web::Query<PagingQuery>,
  use_case: web::Data<Arc<ListPublishedJobsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ListPublishedJobsCommand {
    owner_id: path.into_inner(),
    paging: query.to_params(),
  };

  let page = use_case.execute(command).await?;
  let response = JobCollectionResponse::for_listing(page, http_req.path(), &query)
    .map_err(|e| ApiError::Internal(format!("Failed to build page links: {}", e)))?;

  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/users/{id}/applied
///
/// Only the applicant can list their own applications
pub async fn list_applied_jobs_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  query: web::Query<PagingQuery>,
  use_case: web::Data<Arc<ListAppliedJobsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;
  let command = ListAppliedJobsCommand {
    user_id: path.into_inner(),
    requester_id,
    paging: query.to_params(),
  };

  let page = use_case.execute(command).await?;
  let response = JobCollectionResponse::for_listing(page, http_req.path(), &query)
    .map_err(|e| ApiError::Internal(format!("Failed to build page links: {}", e)))?;

  Ok(HttpResponse::Ok().json(response))
}

/// POST /api/v1/password/reset
pub async fn reset_password_handler(
  request: web::Json<ResetPasswordRequest>,
  use_case: web::Data<Arc<ResetPasswordUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  use_case
    .execute(ResetPasswordCommand {
      token: request.token,
      password: request.password,
      confirm_password: request.confirm_password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Password has been reset".to_string(),
  }))
}
