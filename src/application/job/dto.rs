use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::job::{
  ContactEmail, Education, Experience, Industry, Job, JobDescription, JobError, JobTitle, JobType,
  JobUpdate, NewJob, PageRequest, PaginationLimits, Positions, Salary, SortSpec,
};

/// Editable posting fields as they arrive from a client
#[derive(Debug, Clone, Deserialize)]
pub struct JobFields {
  pub title: String,
  pub description: String,
  pub email: String,
  pub address: String,
  pub company: String,
  pub industries: Vec<String>,
  pub job_type: String,
  pub min_education: String,
  pub experience: String,
  pub salary: Decimal,
  pub positions: Option<u32>,
}

impl JobFields {
  pub fn into_new_job(self, expires_at: Option<DateTime<Utc>>) -> Result<NewJob, JobError> {
    let update = self.into_update()?;
    Ok(NewJob {
      title: update.title,
      description: update.description,
      email: update.email,
      address: update.address,
      company: update.company,
      industries: update.industries,
      job_type: update.job_type,
      min_education: update.min_education,
      experience: update.experience,
      salary: update.salary,
      positions: update.positions,
      expires_at,
    })
  }

  pub fn into_update(self) -> Result<JobUpdate, JobError> {
    let industries = self
      .industries
      .iter()
      .map(|s| Industry::from_str(s))
      .collect::<Result<Vec<_>, _>>()?;

    let positions = match self.positions {
      Some(count) => Positions::new(count)?,
      None => Positions::default(),
    };

    Ok(JobUpdate {
      title: JobTitle::new(self.title)?,
      description: JobDescription::new(self.description)?,
      email: ContactEmail::new(self.email)?,
      address: self.address,
      company: self.company,
      industries,
      job_type: JobType::from_str(&self.job_type)?,
      min_education: Education::from_str(&self.min_education)?,
      experience: Experience::from_str(&self.experience)?,
      salary: Salary::new(self.salary)?,
      positions,
    })
  }
}

/// Raw page and ordering parameters shared by every listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PagingParams {
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub sort_by: Option<String>,
  pub sort_order: Option<String>,
}

impl PagingParams {
  pub fn parse(&self, limits: &PaginationLimits) -> Result<(PageRequest, SortSpec), JobError> {
    let page = PageRequest::parse(self.page, self.limit, limits)?;
    let sort = SortSpec::parse(non_empty(&self.sort_by), non_empty(&self.sort_order))?;
    Ok((page, sort))
  }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub title: String,
  pub slug: String,
  pub description: String,
  pub email: String,
  pub address: String,
  pub company: String,
  pub industries: Vec<String>,
  pub job_type: String,
  pub min_education: String,
  pub experience: String,
  pub salary: Decimal,
  pub positions: u32,
  pub posted_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
  pub application_count: usize,
}

impl From<Job> for JobDto {
  fn from(job: Job) -> Self {
    Self {
      id: job.id,
      owner_id: job.owner_id,
      title: job.title.value().to_string(),
      slug: job.slug.value().to_string(),
      description: job.description.value().to_string(),
      email: job.email.value().to_string(),
      address: job.address,
      company: job.company,
      industries: job
        .industries
        .iter()
        .map(|i| i.as_str().to_string())
        .collect(),
      job_type: job.job_type.as_str().to_string(),
      min_education: job.min_education.as_str().to_string(),
      experience: job.experience.as_str().to_string(),
      salary: job.salary.amount(),
      positions: job.positions.count(),
      posted_at: job.posted_at,
      expires_at: job.expires_at,
      application_count: job.applications.len(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn fields() -> JobFields {
    JobFields {
      title: "Backend Engineer".to_string(),
      description: "Build APIs".to_string(),
      email: "jobs@acme.io".to_string(),
      address: "Main St 1".to_string(),
      company: "Acme".to_string(),
      industries: vec!["Banking".to_string(), "Business".to_string()],
      job_type: "Permanent".to_string(),
      min_education: "Masters".to_string(),
      experience: "2 Years - 5 Years".to_string(),
      salary: dec!(5000),
      positions: None,
    }
  }

  #[test]
  fn test_fields_into_update() {
    let update = fields().into_update().unwrap();

    assert_eq!(update.industries, vec![Industry::Banking, Industry::Business]);
    assert_eq!(update.experience, Experience::TwoToFiveYears);
    assert_eq!(update.positions.count(), 1);
  }

  #[test]
  fn test_fields_reject_unknown_enum_values() {
    let mut data = fields();
    data.job_type = "Freelance".to_string();

    assert!(matches!(
      data.into_update(),
      Err(JobError::Validation(_))
    ));
  }

  #[test]
  fn test_paging_params_treat_blank_sort_as_default() {
    let params = PagingParams {
      sort_by: Some("  ".to_string()),
      ..PagingParams::default()
    };

    let (page, sort) = params.parse(&PaginationLimits::default()).unwrap();
    assert_eq!(page.page(), 1);
    assert_eq!(sort, SortSpec::default());
  }
}
