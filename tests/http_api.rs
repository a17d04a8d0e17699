mod common;

use actix_web::{App, http::StatusCode, test};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use common::{RecordingStorage, job_with_id, new_job, store_job, store_user};
use jobboard::adapters::http::{
  IdentityMiddleware, JobRouteDependencies, UserRouteDependencies, configure_api_routes,
  configure_system_routes,
};
use jobboard::application::job::{
  ApplyToJobUseCase, CreateJobUseCase, DeleteJobUseCase, ListAppliedJobsUseCase, ListJobsUseCase,
  ListPublishedJobsUseCase, ShowJobUseCase, UpdateJobUseCase,
};
use jobboard::application::user::{
  DeleteUserUseCase, RegisterUserUseCase, ResetPasswordUseCase, ShowUserUseCase,
  UpdateProfileUseCase,
};
use jobboard::domain::deletion::DeletionCoordinator;
use jobboard::domain::job::{JobQueryEngine, JobRepository, JobService, PaginationLimits};
use jobboard::domain::user::{Role, SecurityPolicy, UserService};
use jobboard::infrastructure::persistence::memory::{
  InMemoryJobRepository, InMemoryUserRepository,
};
use jobboard::infrastructure::security::{Argon2PasswordHasher, SecureTokenGenerator};
use jobboard::infrastructure::telemetry::PrometheusCleanupRecorder;

const USER_HEADER: &str = "X-Authenticated-User";

struct Backend {
  jobs: Arc<InMemoryJobRepository>,
  users: Arc<InMemoryUserRepository>,
  storage: Arc<RecordingStorage>,
  recorder: Arc<PrometheusCleanupRecorder>,
  job_deps: JobRouteDependencies,
  user_deps: UserRouteDependencies,
}

fn backend() -> Backend {
  let jobs = Arc::new(InMemoryJobRepository::new());
  let users = Arc::new(InMemoryUserRepository::new());
  let storage = Arc::new(RecordingStorage::default());
  let recorder = Arc::new(PrometheusCleanupRecorder::new().unwrap());

  let query_engine = Arc::new(JobQueryEngine::new(
    jobs.clone(),
    PaginationLimits::default(),
  ));
  let job_service = Arc::new(JobService::new(
    jobs.clone(),
    users.clone(),
    query_engine.clone(),
  ));
  let user_service = Arc::new(UserService::new(
    users.clone(),
    Arc::new(Argon2PasswordHasher::new().unwrap()),
    Arc::new(SecureTokenGenerator::new()),
    SecurityPolicy::default(),
  ));
  let coordinator = Arc::new(DeletionCoordinator::new(
    jobs.clone(),
    users.clone(),
    storage.clone(),
    recorder.clone(),
  ));

  let job_deps = JobRouteDependencies {
    list_jobs: Arc::new(ListJobsUseCase::new(query_engine)),
    show_job: Arc::new(ShowJobUseCase::new(job_service.clone())),
    create_job: Arc::new(CreateJobUseCase::new(job_service.clone())),
    update_job: Arc::new(UpdateJobUseCase::new(job_service.clone())),
    delete_job: Arc::new(DeleteJobUseCase::new(coordinator.clone())),
    apply_to_job: Arc::new(ApplyToJobUseCase::new(job_service.clone())),
  };
  let user_deps = UserRouteDependencies {
    register_user: Arc::new(RegisterUserUseCase::new(user_service.clone())),
    show_user: Arc::new(ShowUserUseCase::new(user_service.clone())),
    update_profile: Arc::new(UpdateProfileUseCase::new(user_service.clone())),
    delete_user: Arc::new(DeleteUserUseCase::new(coordinator)),
    reset_password: Arc::new(ResetPasswordUseCase::new(user_service)),
    list_published_jobs: Arc::new(ListPublishedJobsUseCase::new(job_service.clone())),
    list_applied_jobs: Arc::new(ListAppliedJobsUseCase::new(job_service)),
  };

  Backend {
    jobs,
    users,
    storage,
    recorder,
    job_deps,
    user_deps,
  }
}

fn job_body(title: &str) -> Value {
  json!({
    "title": title,
    "description": "Build and operate our services",
    "email": "jobs@acme.io",
    "address": "Main St 1",
    "company": "Acme",
    "industries": ["Information Technology"],
    "jobType": "Permanent",
    "minEducation": "Bachelors",
    "experience": "No Experience",
    "salary": "4200.50",
    "positions": 2
  })
}

#[actix_web::test]
async fn test_search_returns_paginated_envelope() {
  let backend = backend();
  let owner = Uuid::new_v4();
  let now = Utc::now();
  for (n, title) in [(1u128, "Backend Engineer"), (2, "Data Analyst"), (3, "QA Engineer")] {
    store_job(&backend.jobs, job_with_id(n, owner, new_job(title, "Acme"), now)).await;
  }

  let app = test::init_service(
    App::new()
      .wrap(IdentityMiddleware::new(USER_HEADER).unwrap())
      .configure(|cfg| {
        configure_api_routes(cfg, backend.job_deps.clone(), backend.user_deps.clone())
      }),
  )
  .await;

  let req = test::TestRequest::get()
    .uri("/api/v1/jobs?limit=2")
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;

  assert_eq!(body["totalCount"], 3);
  assert_eq!(body["items"].as_array().unwrap().len(), 2);
  assert_eq!(body["items"][0]["title"], "Backend Engineer");
  assert_eq!(body["previousPage"], "");
  assert_eq!(body["nextPage"], "/api/v1/jobs?page=2&limit=2");

  let req = test::TestRequest::get()
    .uri("/api/v1/jobs?title=engineer&page=2&limit=1")
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;

  assert_eq!(body["totalCount"], 2);
  assert_eq!(body["items"][0]["title"], "QA Engineer");
  assert_eq!(body["previousPage"], "/api/v1/jobs?title=engineer&page=1&limit=1");
  assert_eq!(body["nextPage"], "");

  let req = test::TestRequest::get()
    .uri("/api/v1/jobs?limit=0")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_publishing_requires_an_identity() {
  let backend = backend();
  let employer = store_user(&backend.users, "hr@acme.io", Role::Employer, None).await;

  let app = test::init_service(
    App::new()
      .wrap(IdentityMiddleware::new(USER_HEADER).unwrap())
      .configure(|cfg| {
        configure_api_routes(cfg, backend.job_deps.clone(), backend.user_deps.clone())
      }),
  )
  .await;

  let req = test::TestRequest::post()
    .uri("/api/v1/jobs")
    .set_json(job_body("Rust Developer"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::post()
    .uri("/api/v1/jobs")
    .insert_header((USER_HEADER, employer.id.to_string()))
    .set_json(job_body("Rust Developer"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["slug"], "rust-developer");
  assert_eq!(body["ownerId"], employer.id.to_string());
}

#[actix_web::test]
async fn test_invalid_job_id_is_a_bad_request() {
  let backend = backend();
  let app = test::init_service(App::new().configure(|cfg| {
    configure_api_routes(cfg, backend.job_deps.clone(), backend.user_deps.clone())
  }))
  .await;

  let req = test::TestRequest::get()
    .uri("/api/v1/jobs/not-a-uuid")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "validation_error");

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/jobs/{}", Uuid::new_v4()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_deleting_a_job_releases_resumes_and_counts_them() {
  let backend = backend();
  let owner = Uuid::new_v4();
  let job = store_job(
    &backend.jobs,
    job_with_id(1, owner, new_job("Backend Engineer", "Acme"), Utc::now()),
  )
  .await;
  backend
    .jobs
    .apply(job.id, Uuid::new_v4(), "resume.pdf".to_string(), Utc::now())
    .await
    .unwrap();

  let app = test::init_service(
    App::new()
      .wrap(IdentityMiddleware::new(USER_HEADER).unwrap())
      .configure(|cfg| {
        configure_api_routes(cfg, backend.job_deps.clone(), backend.user_deps.clone())
      })
      .configure(|cfg| configure_system_routes(cfg, backend.recorder.clone())),
  )
  .await;

  let uri = format!("/api/v1/jobs/{}", job.id);
  let req = test::TestRequest::delete()
    .uri(&uri)
    .insert_header((USER_HEADER, Uuid::new_v4().to_string()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);

  let req = test::TestRequest::delete()
    .uri(&uri)
    .insert_header((USER_HEADER, owner.to_string()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  assert_eq!(backend.storage.calls().len(), 1);

  let req = test::TestRequest::delete()
    .uri(&uri)
    .insert_header((USER_HEADER, owner.to_string()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::get().uri("/metrics").to_request();
  let body = test::call_and_read_body(&app, req).await;
  let metrics = String::from_utf8(body.to_vec()).unwrap();
  assert!(metrics.contains(r#"jobboard_orphaned_files_released_total{aggregate="job"} 1"#));
}

#[actix_web::test]
async fn test_register_then_read_profile() {
  let backend = backend();
  let app = test::init_service(App::new().configure(|cfg| {
    configure_api_routes(cfg, backend.job_deps.clone(), backend.user_deps.clone())
  }))
  .await;

  let req = test::TestRequest::post()
    .uri("/api/v1/users")
    .set_json(json!({
      "name": "Jane Doe",
      "email": "jane@example.com",
      "password": "correct horse"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created: Value = test::read_body_json(resp).await;
  assert_eq!(created["role"], "user");
  assert!(created.get("passwordHash").is_none());

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/users/{}", created["id"].as_str().unwrap()))
    .to_request();
  let shown: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(shown["email"], "jane@example.com");

  let req = test::TestRequest::post()
    .uri("/api/v1/users")
    .set_json(json!({
      "name": "Jane Again",
      "email": "JANE@example.com",
      "password": "correct horse"
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
}
