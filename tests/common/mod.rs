#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use jobboard::domain::deletion::DeletionCoordinator;
use jobboard::domain::job::{
  ContactEmail, Education, Experience, Industry, Job, JobDescription, JobError, JobFilter,
  JobQueryEngine, JobRepository, JobTitle, JobType, NewJob, PaginationLimits, Positions, Salary,
};
use jobboard::domain::storage::{
  CleanupRecorder, CleanupReport, NoOpCleanupRecorder, OrphanedFiles, StorageError,
  StorageGateway, Visibility,
};
use jobboard::domain::user::{
  Email, NewUser, PasswordHash, PersonName, Role, User, UserRepository,
};
use jobboard::infrastructure::persistence::memory::{
  InMemoryJobRepository, InMemoryUserRepository,
};

pub const HASH: &str =
  "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$S1GoZ7lzXbE5RmmHBhS9b4ahKcdb66PmfQmQmtsyCuo";

/// Storage fake that remembers every delete call and fails for chosen keys
#[derive(Default)]
pub struct RecordingStorage {
  calls: Mutex<Vec<(String, Visibility)>>,
  failing: HashSet<String>,
}

impl RecordingStorage {
  pub fn failing_on(keys: &[&str]) -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      failing: keys.iter().map(|k| k.to_string()).collect(),
    }
  }

  pub fn calls(&self) -> Vec<(String, Visibility)> {
    let mut calls = self.calls.lock().unwrap().clone();
    calls.sort();
    calls
  }
}

#[async_trait]
impl StorageGateway for RecordingStorage {
  async fn delete(&self, key: &str, visibility: Visibility) -> Result<(), StorageError> {
    self
      .calls
      .lock()
      .unwrap()
      .push((key.to_string(), visibility));
    if self.failing.contains(key) {
      return Err(StorageError::Backend(format!("cannot remove {}", key)));
    }
    Ok(())
  }
}

/// Recorder fake keeping every report it was handed
#[derive(Default)]
pub struct CapturingRecorder {
  pub reports: Mutex<Vec<(&'static str, CleanupReport)>>,
}

impl CleanupRecorder for CapturingRecorder {
  fn record(&self, aggregate: &'static str, report: &CleanupReport) {
    self
      .reports
      .lock()
      .unwrap()
      .push((aggregate, report.clone()));
  }
}

/// In-memory job repository whose writes can be switched to fail
#[derive(Default)]
pub struct FlakyJobRepository {
  pub inner: InMemoryJobRepository,
  fail_deletes: AtomicBool,
  fail_removals: AtomicBool,
}

impl FlakyJobRepository {
  pub fn fail_deletes(&self, fail: bool) {
    self.fail_deletes.store(fail, Ordering::SeqCst);
  }

  pub fn fail_removals(&self, fail: bool) {
    self.fail_removals.store(fail, Ordering::SeqCst);
  }
}

#[async_trait]
impl JobRepository for FlakyJobRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobError> {
    self.inner.find_by_id(id).await
  }

  async fn find_all_matching(&self, filter: &JobFilter) -> Result<Vec<Job>, JobError> {
    self.inner.find_all_matching(filter).await
  }

  async fn create(&self, job: Job) -> Result<Job, JobError> {
    self.inner.create(job).await
  }

  async fn update(&self, job: Job) -> Result<Job, JobError> {
    self.inner.update(job).await
  }

  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, JobError> {
    if self.fail_deletes.load(Ordering::SeqCst) {
      return Err(JobError::Repository("connection reset".to_string()));
    }
    self.inner.delete(id).await
  }

  async fn apply(
    &self,
    job_id: Uuid,
    user_id: Uuid,
    resume: String,
    applied_at: DateTime<Utc>,
  ) -> Result<(), JobError> {
    self.inner.apply(job_id, user_id, resume, applied_at).await
  }

  async fn remove_applications_by_user(&self, user_id: Uuid) -> Result<OrphanedFiles, JobError> {
    if self.fail_removals.load(Ordering::SeqCst) {
      return Err(JobError::Repository("connection reset".to_string()));
    }
    self.inner.remove_applications_by_user(user_id).await
  }
}

pub struct Fixture {
  pub jobs: Arc<InMemoryJobRepository>,
  pub users: Arc<InMemoryUserRepository>,
  pub storage: Arc<RecordingStorage>,
  pub coordinator: DeletionCoordinator,
}

impl Fixture {
  pub fn new() -> Self {
    Self::with_storage(RecordingStorage::default())
  }

  pub fn with_storage(storage: RecordingStorage) -> Self {
    Self::with_storage_and_recorder(storage, Arc::new(NoOpCleanupRecorder))
  }

  pub fn with_storage_and_recorder(
    storage: RecordingStorage,
    recorder: Arc<dyn CleanupRecorder>,
  ) -> Self {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let storage = Arc::new(storage);
    let coordinator = DeletionCoordinator::new(
      jobs.clone(),
      users.clone(),
      storage.clone(),
      recorder,
    );
    Self {
      jobs,
      users,
      storage,
      coordinator,
    }
  }

  pub fn query_engine(&self) -> JobQueryEngine {
    JobQueryEngine::new(self.jobs.clone(), PaginationLimits::default())
  }
}

pub fn new_job(title: &str, company: &str) -> NewJob {
  NewJob {
    title: JobTitle::new(title).unwrap(),
    description: JobDescription::new(format!("{} at {}", title, company)).unwrap(),
    email: ContactEmail::new("jobs@example.com").unwrap(),
    address: "Main St 1".to_string(),
    company: company.to_string(),
    industries: vec![Industry::InformationTechnology],
    job_type: JobType::Permanent,
    min_education: Education::Bachelors,
    experience: Experience::NoExperience,
    salary: Salary::new(dec!(1000)).unwrap(),
    positions: Positions::default(),
    expires_at: None,
  }
}

/// A job with a fixed, small id so id ordering is predictable
pub fn job_with_id(n: u128, owner_id: Uuid, data: NewJob, posted_at: DateTime<Utc>) -> Job {
  let mut job = Job::new(owner_id, data, posted_at).unwrap();
  job.id = Uuid::from_u128(n);
  job
}

pub fn user(email: &str, role: Role, avatar: Option<&str>) -> User {
  User::new(
    NewUser {
      name: PersonName::new("Test User").unwrap(),
      email: Email::new(email).unwrap(),
      password_hash: PasswordHash::from_hash(HASH).unwrap(),
      role,
      avatar: avatar.map(str::to_string),
    },
    Utc::now(),
  )
}

pub async fn store_user(
  repo: &InMemoryUserRepository,
  email: &str,
  role: Role,
  avatar: Option<&str>,
) -> User {
  repo.create(user(email, role, avatar)).await.unwrap()
}

pub async fn store_job(repo: &InMemoryJobRepository, job: Job) -> Job {
  repo.create(job).await.unwrap()
}
