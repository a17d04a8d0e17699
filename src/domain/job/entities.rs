use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::storage::{FileRef, OrphanedFiles};

use super::errors::JobError;
use super::value_objects::{
  ContactEmail, Education, Experience, Industry, JobDescription, JobTitle, JobType, Positions,
  Salary, Slug, ValueObjectError,
};

/// Number of days a posting stays open when no expiry date is given
pub const DEFAULT_OPEN_DAYS: i64 = 7;

/// A user's application to a job, embedded in the job aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
  /// Key of the uploaded resume in private storage
  pub resume: String,
  pub applied_at: DateTime<Utc>,
}

/// Validated data for a new posting
#[derive(Debug, Clone)]
pub struct NewJob {
  pub title: JobTitle,
  pub description: JobDescription,
  pub email: ContactEmail,
  pub address: String,
  pub company: String,
  pub industries: Vec<Industry>,
  pub job_type: JobType,
  pub min_education: Education,
  pub experience: Experience,
  pub salary: Salary,
  pub positions: Positions,
  pub expires_at: Option<DateTime<Utc>>,
}

/// Replacement values for the mutable fields of a posting
#[derive(Debug, Clone)]
pub struct JobUpdate {
  pub title: JobTitle,
  pub description: JobDescription,
  pub email: ContactEmail,
  pub address: String,
  pub company: String,
  pub industries: Vec<Industry>,
  pub job_type: JobType,
  pub min_education: Education,
  pub experience: Experience,
  pub salary: Salary,
  pub positions: Positions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub title: JobTitle,
  pub slug: Slug,
  pub description: JobDescription,
  pub email: ContactEmail,
  pub address: String,
  pub company: String,
  pub industries: Vec<Industry>,
  pub job_type: JobType,
  pub min_education: Education,
  pub experience: Experience,
  pub salary: Salary,
  pub positions: Positions,
  pub posted_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
  pub applications: BTreeMap<Uuid, Application>,
}

impl Job {
  pub fn new(owner_id: Uuid, data: NewJob, now: DateTime<Utc>) -> Result<Self, ValueObjectError> {
    let expires_at = data
      .expires_at
      .unwrap_or(now + Duration::days(DEFAULT_OPEN_DAYS));
    if expires_at < now {
      return Err(ValueObjectError::InvalidDates(
        "Expiry date cannot be before the posting date".to_string(),
      ));
    }

    let address = required("address", data.address)?;
    let company = required("company", data.company)?;
    let industries = normalize_industries(data.industries)?;

    Ok(Self {
      id: Uuid::new_v4(),
      owner_id,
      slug: Slug::from_title(&data.title),
      title: data.title,
      description: data.description,
      email: data.email,
      address,
      company,
      industries,
      job_type: data.job_type,
      min_education: data.min_education,
      experience: data.experience,
      salary: data.salary,
      positions: data.positions,
      posted_at: now,
      expires_at,
      applications: BTreeMap::new(),
    })
  }

  /// Replaces the mutable fields; posting and expiry dates are kept
  pub fn update(&mut self, data: JobUpdate) -> Result<(), ValueObjectError> {
    let address = required("address", data.address)?;
    let company = required("company", data.company)?;
    let industries = normalize_industries(data.industries)?;

    self.slug = Slug::from_title(&data.title);
    self.title = data.title;
    self.description = data.description;
    self.email = data.email;
    self.address = address;
    self.company = company;
    self.industries = industries;
    self.job_type = data.job_type;
    self.min_education = data.min_education;
    self.experience = data.experience;
    self.salary = data.salary;
    self.positions = data.positions;
    Ok(())
  }

  pub fn is_owned_by(&self, user_id: Uuid) -> bool {
    self.owner_id == user_id
  }

  pub fn is_open(&self, now: DateTime<Utc>) -> bool {
    now <= self.expires_at
  }

  pub fn has_applicant(&self, user_id: Uuid) -> bool {
    self.applications.contains_key(&user_id)
  }

  pub fn apply(
    &mut self,
    user_id: Uuid,
    resume: String,
    applied_at: DateTime<Utc>,
  ) -> Result<(), JobError> {
    if self.has_applicant(user_id) {
      return Err(JobError::AlreadyApplied {
        job_id: self.id,
        user_id,
      });
    }
    self
      .applications
      .insert(user_id, Application { resume, applied_at });
    Ok(())
  }

  pub fn remove_application(&mut self, user_id: Uuid) -> Option<Application> {
    self.applications.remove(&user_id)
  }

  /// Resume files held by this job's applications
  pub fn resume_files(&self) -> OrphanedFiles {
    self
      .applications
      .values()
      .map(|application| FileRef::private(application.resume.clone()))
      .collect()
  }
}

fn required(field: &str, value: String) -> Result<String, ValueObjectError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ValueObjectError::MissingField(field.to_string()));
  }
  Ok(trimmed.to_string())
}

fn normalize_industries(mut industries: Vec<Industry>) -> Result<Vec<Industry>, ValueObjectError> {
  industries.sort();
  industries.dedup();
  if industries.is_empty() {
    return Err(ValueObjectError::InvalidIndustry(
      "At least one industry is required".to_string(),
    ));
  }
  Ok(industries)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn new_job(title: &str) -> NewJob {
    NewJob {
      title: JobTitle::new(title).unwrap(),
      description: JobDescription::new("Build things").unwrap(),
      email: ContactEmail::new("jobs@acme.io").unwrap(),
      address: "Rua A, 10".to_string(),
      company: "Acme".to_string(),
      industries: vec![Industry::InformationTechnology],
      job_type: JobType::Permanent,
      min_education: Education::Bachelors,
      experience: Experience::NoExperience,
      salary: Salary::new(dec!(1200)).unwrap(),
      positions: Positions::default(),
      expires_at: None,
    }
  }

  #[test]
  fn test_new_job_defaults() {
    let now = Utc::now();
    let job = Job::new(Uuid::new_v4(), new_job("Rust Developer"), now).unwrap();

    assert_eq!(job.slug.value(), "rust-developer");
    assert_eq!(job.positions.count(), 1);
    assert_eq!(job.expires_at, now + Duration::days(DEFAULT_OPEN_DAYS));
    assert!(job.applications.is_empty());
  }

  #[test]
  fn test_new_job_rejects_expiry_before_posting() {
    let now = Utc::now();
    let mut data = new_job("Rust Developer");
    data.expires_at = Some(now - Duration::days(1));

    assert!(matches!(
      Job::new(Uuid::new_v4(), data, now),
      Err(ValueObjectError::InvalidDates(_))
    ));
  }

  #[test]
  fn test_new_job_requires_industry() {
    let mut data = new_job("Rust Developer");
    data.industries.clear();

    assert!(Job::new(Uuid::new_v4(), data, Utc::now()).is_err());
  }

  #[test]
  fn test_update_recomputes_slug_and_keeps_dates() {
    let now = Utc::now();
    let mut job = Job::new(Uuid::new_v4(), new_job("Rust Developer"), now).unwrap();
    let data = new_job("Staff Engineer");

    job
      .update(JobUpdate {
        title: data.title,
        description: data.description,
        email: data.email,
        address: data.address,
        company: data.company,
        industries: data.industries,
        job_type: JobType::Temporary,
        min_education: data.min_education,
        experience: data.experience,
        salary: data.salary,
        positions: data.positions,
      })
      .unwrap();

    assert_eq!(job.slug.value(), "staff-engineer");
    assert_eq!(job.job_type, JobType::Temporary);
    assert_eq!(job.posted_at, now);
  }

  #[test]
  fn test_apply_only_once_per_applicant() {
    let mut job = Job::new(Uuid::new_v4(), new_job("Rust Developer"), Utc::now()).unwrap();
    let applicant = Uuid::new_v4();

    job
      .apply(applicant, "resume.pdf".to_string(), Utc::now())
      .unwrap();
    let second = job.apply(applicant, "other.pdf".to_string(), Utc::now());

    assert!(matches!(second, Err(JobError::AlreadyApplied { .. })));
    assert_eq!(job.applications.len(), 1);
    assert_eq!(job.resume_files().len(), 1);
  }
}
