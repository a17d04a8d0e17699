use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ApplyRequest, JobCollectionResponse, JobRequest, ListJobsQuery},
  errors::ApiError,
};
use crate::application::job::{
  ApplyToJobCommand, ApplyToJobUseCase, CreateJobCommand, CreateJobUseCase, DeleteJobCommand,
  DeleteJobUseCase, ListJobsUseCase, ShowJobCommand, ShowJobUseCase, UpdateJobCommand,
  UpdateJobUseCase,
};

use super::requester_id;

/// GET /api/v1/jobs
///
/// Query: title, description, company, industry, jobType, minEducation, page, limit,
/// sortBy, sortOrder
pub async fn list_jobs_handler(
  http_req: HttpRequest,
  query: web::Query<ListJobsQuery>,
  use_case: web::Data<Arc<ListJobsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let page = use_case.execute(query.to_command()).await?;
  let response = JobCollectionResponse::for_search(page, http_req.path(), &query)
    .map_err(|e| ApiError::Internal(format!("Failed to build page links: {}", e)))?;

  Ok(HttpResponse::Ok().json(response))
}

/// GET /api/v1/jobs/{id}
pub async fn show_job_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ShowJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let job = use_case
    .execute(ShowJobCommand {
      job_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(job))
}

/// POST /api/v1/jobs
///
/// Employers only. Response: the created job with status 201
pub async fn create_job_handler(
  http_req: HttpRequest,
  request: web::Json<JobRequest>,
  use_case: web::Data<Arc<CreateJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;
  request.validate()?;

  let request = request.into_inner();
  let expires_at = request.expires_at;
  let command = CreateJobCommand {
    requester_id,
    fields: request.into_fields(),
    expires_at,
  };

  let job = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(job))
}

/// PUT /api/v1/jobs/{id}
pub async fn update_job_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<JobRequest>,
  use_case: web::Data<Arc<UpdateJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;
  request.validate()?;

  let command = UpdateJobCommand {
    job_id: path.into_inner(),
    requester_id,
    fields: request.into_inner().into_fields(),
  };

  let job = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(job))
}

/// DELETE /api/v1/jobs/{id}
///
/// Response: 204 once the job is gone; file cleanup failures are not reported
pub async fn delete_job_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;

  use_case
    .execute(DeleteJobCommand {
      job_id: path.into_inner(),
      requester_id,
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}

/// POST /api/v1/jobs/{id}/apply
pub async fn apply_to_job_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<ApplyRequest>,
  use_case: web::Data<Arc<ApplyToJobUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let requester_id = requester_id(&http_req)?;
  request.validate()?;

  let command = ApplyToJobCommand {
    job_id: path.into_inner(),
    requester_id,
    resume: request.into_inner().resume,
  };

  let job = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(job))
}
