use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::application::job::{
  ApplyToJobUseCase, CreateJobUseCase, DeleteJobUseCase, ListAppliedJobsUseCase, ListJobsUseCase,
  ListPublishedJobsUseCase, ShowJobUseCase, UpdateJobUseCase,
};
use crate::application::user::{
  DeleteUserUseCase, RegisterUserUseCase, ResetPasswordUseCase, ShowUserUseCase,
  UpdateProfileUseCase,
};
use crate::infrastructure::telemetry::PrometheusCleanupRecorder;

use super::errors::ApiError;
use super::handlers::{jobs, system, users};

/// Use cases served under `/api/v1/jobs`
#[derive(Clone)]
pub struct JobRouteDependencies {
  pub list_jobs: Arc<ListJobsUseCase>,
  pub show_job: Arc<ShowJobUseCase>,
  pub create_job: Arc<CreateJobUseCase>,
  pub update_job: Arc<UpdateJobUseCase>,
  pub delete_job: Arc<DeleteJobUseCase>,
  pub apply_to_job: Arc<ApplyToJobUseCase>,
}

/// Use cases served under `/api/v1/users` and `/api/v1/password`
#[derive(Clone)]
pub struct UserRouteDependencies {
  pub register_user: Arc<RegisterUserUseCase>,
  pub show_user: Arc<ShowUserUseCase>,
  pub update_profile: Arc<UpdateProfileUseCase>,
  pub delete_user: Arc<DeleteUserUseCase>,
  pub reset_password: Arc<ResetPasswordUseCase>,
  pub list_published_jobs: Arc<ListPublishedJobsUseCase>,
  pub list_applied_jobs: Arc<ListAppliedJobsUseCase>,
}

/// Configure job routes
///
/// # Routes
///
/// - GET / - Search jobs (paginated)
/// - POST / - Publish a job (employers)
/// - GET /{id} - Show a job
/// - PUT /{id} - Edit a job (owner)
/// - DELETE /{id} - Delete a job and release its resumes (owner)
/// - POST /{id}/apply - Apply with an uploaded resume (job seekers)
pub fn configure_job_routes(cfg: &mut web::ServiceConfig, deps: JobRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.list_jobs))
    .app_data(web::Data::new(deps.show_job))
    .app_data(web::Data::new(deps.create_job))
    .app_data(web::Data::new(deps.update_job))
    .app_data(web::Data::new(deps.delete_job))
    .app_data(web::Data::new(deps.apply_to_job))
    .route("", web::get().to(jobs::list_jobs_handler))
    .route("", web::post().to(jobs::create_job_handler))
    .route("/{id}", web::get().to(jobs::show_job_handler))
    .route("/{id}", web::put().to(jobs::update_job_handler))
    .route("/{id}", web::delete().to(jobs::delete_job_handler))
    .route("/{id}/apply", web::post().to(jobs::apply_to_job_handler));
}

/// Configure user routes
///
/// # Routes
///
/// - POST / - Register an account
/// - GET /{id} - Show a profile
/// - PUT /{id} - Edit own profile
/// - DELETE /{id} - Delete own account and applications
/// - GET /{id}/jobs - Jobs published by the user (paginated)
/// - GET /{id}/applied - Jobs the user applied to (paginated, self only)
pub fn configure_user_routes(cfg: &mut web::ServiceConfig, deps: UserRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.register_user))
    .app_data(web::Data::new(deps.show_user))
    .app_data(web::Data::new(deps.update_profile))
    .app_data(web::Data::new(deps.delete_user))
    .app_data(web::Data::new(deps.list_published_jobs))
    .app_data(web::Data::new(deps.list_applied_jobs))
    .route("", web::post().to(users::register_handler))
    .route("/{id}", web::get().to(users::show_user_handler))
    .route("/{id}", web::put().to(users::update_profile_handler))
    .route("/{id}", web::delete().to(users::delete_user_handler))
    .route("/{id}/jobs", web::get().to(users::list_published_jobs_handler))
    .route("/{id}/applied", web::get().to(users::list_applied_jobs_handler));
}

/// Mounts every API scope under `/api/v1`
pub fn configure_api_routes(
  cfg: &mut web::ServiceConfig,
  job_deps: JobRouteDependencies,
  user_deps: UserRouteDependencies,
) {
  let reset_password = user_deps.reset_password.clone();

  cfg.service(
    web::scope("/api/v1")
      .app_data(json_config())
      .app_data(query_config())
      .app_data(path_config())
      .service(web::scope("/jobs").configure(|cfg| configure_job_routes(cfg, job_deps)))
      .service(web::scope("/users").configure(|cfg| configure_user_routes(cfg, user_deps)))
      .service(
        web::scope("/password")
          .app_data(web::Data::new(reset_password))
          .route("/reset", web::post().to(users::reset_password_handler)),
      ),
  );
}

/// Health check and Prometheus scrape endpoints
pub fn configure_system_routes(
  cfg: &mut web::ServiceConfig,
  recorder: Arc<PrometheusCleanupRecorder>,
) {
  cfg
    .app_data(web::Data::new(recorder))
    .route("/health", web::get().to(system::health_handler))
    .route("/metrics", web::get().to(system::metrics_handler));
}

// Extractor failures use the same JSON error body as the handlers

fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
    ApiError::Validation(format!("Invalid JSON body: {}", err)).into()
  })
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
    ApiError::Validation(format!("Invalid query string: {}", err)).into()
  })
}

fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
    ApiError::Validation(format!("Invalid path parameter: {}", err)).into()
  })
}
