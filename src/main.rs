use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobboard::{
  adapters::http::{
    IdentityMiddleware, JobRouteDependencies, RequestIdMiddleware, UserRouteDependencies,
    configure_api_routes, configure_system_routes,
  },
  application::job::{
    ApplyToJobUseCase, CreateJobUseCase, DeleteJobUseCase, ListAppliedJobsUseCase,
    ListJobsUseCase, ListPublishedJobsUseCase, ShowJobUseCase, UpdateJobUseCase,
  },
  application::user::{
    DeleteUserUseCase, RegisterUserUseCase, ResetPasswordUseCase, ShowUserUseCase,
    UpdateProfileUseCase,
  },
  domain::deletion::DeletionCoordinator,
  domain::job::{JobQueryEngine, JobRepository, JobService},
  domain::user::{UserRepository, UserService},
  infrastructure::{
    config::{Config, DatabaseConfig, PersistenceBackend},
    persistence::memory::{InMemoryJobRepository, InMemoryUserRepository},
    persistence::postgres::{PostgresJobRepository, PostgresUserRepository},
    security::{Argon2PasswordHasher, SecureTokenGenerator},
    storage::create_storage,
    telemetry::PrometheusCleanupRecorder,
  },
};

type Repositories = (Arc<dyn JobRepository>, Arc<dyn UserRepository>);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jobboard=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting jobboard");

  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  let (job_repo, user_repo) = match config.persistence.backend {
    PersistenceBackend::Postgres => connect_postgres(&config.database).await?,
    PersistenceBackend::Memory => {
      tracing::warn!("Using in-memory persistence; data is lost on restart");
      let job_repo: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
      let user_repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
      (job_repo, user_repo)
    }
  };

  let storage = create_storage(&config.storage);
  let recorder = Arc::new(
    PrometheusCleanupRecorder::new().map_err(|e| {
      std::io::Error::other(format!("Failed to register metrics: {}", e))
    })?,
  );

  let password_hasher = Arc::new(
    Argon2PasswordHasher::new()
      .map_err(|e| std::io::Error::other(format!("Failed to initialise hasher: {}", e)))?,
  );
  let token_generator = Arc::new(SecureTokenGenerator::new());

  // Domain services
  let query_engine = Arc::new(JobQueryEngine::new(
    job_repo.clone(),
    config.listing.limits(),
  ));
  let job_service = Arc::new(JobService::new(
    job_repo.clone(),
    user_repo.clone(),
    query_engine.clone(),
  ));
  let user_service = Arc::new(UserService::new(
    user_repo.clone(),
    password_hasher,
    token_generator,
    config.security.policy(),
  ));
  let coordinator = Arc::new(DeletionCoordinator::new(
    job_repo,
    user_repo,
    storage,
    recorder.clone(),
  ));

  // Use cases
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

  let identity = IdentityMiddleware::new(&config.auth.user_header).map_err(|e| {
    std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      format!("Invalid auth.user_header '{}': {}", config.auth.user_header, e),
    )
  })?;

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  tracing::info!(
    "Starting HTTP server on {}:{} ({})",
    server_host,
    server_port,
    config.server.base_url
  );

  HttpServer::new(move || {
    App::new()
      .wrap(identity.clone())
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_api_routes(cfg, job_deps.clone(), user_deps.clone()))
      .configure(|cfg| configure_system_routes(cfg, recorder.clone()))
      .default_service(web::to(|| async {
        actix_web::HttpResponse::NotFound().json(jobboard::adapters::http::ErrorResponse {
          error: "not_found".to_string(),
          message: "No such route".to_string(),
          details: None,
        })
      }))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

async fn connect_postgres(database: &DatabaseConfig) -> std::io::Result<Repositories> {
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(database.max_connections)
      .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
      .connect(&database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {}", e)))?;
  tracing::info!("Database migrations completed");

  let job_repo: Arc<dyn JobRepository> = Arc::new(PostgresJobRepository::new(db_pool.clone()));
  let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db_pool));
  Ok((job_repo, user_repo))
}
