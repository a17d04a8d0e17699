//! Filtering, ordering and pagination policy for job listings.
//!
//! Filtering is delegated to the repository as a predicate conjunction; ordering and
//! pagination are applied in memory over the full candidate set so that every backing
//! store yields the same pages.

use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::Job;
use super::errors::JobError;
use super::ports::JobRepository;
use super::value_objects::{Education, Industry, JobType};

/// Criteria a job must satisfy to be listed. Absent criteria impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
  pub title: Option<String>,
  pub description: Option<String>,
  pub company: Option<String>,
  /// Any-of match against the job's industries; empty means no constraint
  pub industries: Vec<Industry>,
  pub job_type: Option<JobType>,
  pub min_education: Option<Education>,
  pub posted_by: Option<Uuid>,
  pub applied_by: Option<Uuid>,
}

impl JobFilter {
  pub fn posted_by(owner_id: Uuid) -> Self {
    Self {
      posted_by: Some(owner_id),
      ..Self::default()
    }
  }

  pub fn applied_by(user_id: Uuid) -> Self {
    Self {
      applied_by: Some(user_id),
      ..Self::default()
    }
  }

  pub fn matches(&self, job: &Job) -> bool {
    contains_ignore_case(job.title.value(), self.title.as_deref())
      && contains_ignore_case(job.description.value(), self.description.as_deref())
      && contains_ignore_case(&job.company, self.company.as_deref())
      && (self.industries.is_empty()
        || self
          .industries
          .iter()
          .any(|industry| job.industries.contains(industry)))
      && self.job_type.is_none_or(|job_type| job.job_type == job_type)
      && self
        .min_education
        .is_none_or(|education| job.min_education == education)
      && self.posted_by.is_none_or(|owner| job.owner_id == owner)
      && self.applied_by.is_none_or(|user| job.has_applicant(user))
  }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
  match needle {
    Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    None => true,
  }
}

/// Page size bounds, taken from the `listing` configuration section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
  pub default_limit: u32,
  pub max_limit: u32,
}

impl Default for PaginationLimits {
  fn default() -> Self {
    Self {
      default_limit: 10,
      max_limit: 100,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: u32,
  limit: u32,
}

impl PageRequest {
  pub fn new(page: u32, limit: u32) -> Result<Self, JobError> {
    if page == 0 {
      return Err(JobError::InvalidQuery("page must be at least 1".to_string()));
    }
    if limit == 0 {
      return Err(JobError::InvalidQuery("limit must be at least 1".to_string()));
    }
    Ok(Self { page, limit })
  }

  /// Validates raw, possibly absent, page and limit values
  pub fn parse(
    page: Option<i64>,
    limit: Option<i64>,
    limits: &PaginationLimits,
  ) -> Result<Self, JobError> {
    let page = match page {
      None => 1,
      Some(p) if p >= 1 => u32::try_from(p)
        .map_err(|_| JobError::InvalidQuery(format!("page {} is out of range", p)))?,
      Some(p) => {
        return Err(JobError::InvalidQuery(format!(
          "page must be at least 1, got {}",
          p
        )));
      }
    };

    let limit = match limit {
      None => limits.default_limit,
      Some(l) if l >= 1 && l <= i64::from(limits.max_limit) => l as u32,
      Some(l) => {
        return Err(JobError::InvalidQuery(format!(
          "limit must be between 1 and {}, got {}",
          limits.max_limit, l
        )));
      }
    };

    Self::new(page, limit)
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn limit(&self) -> u32 {
    self.limit
  }

  pub fn offset(&self) -> usize {
    (self.page as usize - 1).saturating_mul(self.limit as usize)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
  #[default]
  PostingDate,
  ExpiryDate,
  Title,
  Company,
  Salary,
  Positions,
  Id,
}

impl FromStr for SortField {
  type Err = JobError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "postingDate" | "posting_date" | "createdAt" | "created_at" => Ok(SortField::PostingDate),
      "expiryDate" | "expiry_date" | "lastDate" => Ok(SortField::ExpiryDate),
      "title" => Ok(SortField::Title),
      "company" => Ok(SortField::Company),
      "salary" => Ok(SortField::Salary),
      "positions" | "position" => Ok(SortField::Positions),
      "id" => Ok(SortField::Id),
      other => Err(JobError::InvalidQuery(format!(
        "cannot sort by '{}'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

impl FromStr for SortOrder {
  type Err = JobError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "asc" | "ascending" => Ok(SortOrder::Asc),
      "desc" | "descending" => Ok(SortOrder::Desc),
      other => Err(JobError::InvalidQuery(format!(
        "sort order must be asc or desc, got '{}'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
  pub field: SortField,
  pub order: SortOrder,
}

impl SortSpec {
  pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, JobError> {
    Ok(Self {
      field: sort_by.map(SortField::from_str).transpose()?.unwrap_or_default(),
      order: sort_order
        .map(SortOrder::from_str)
        .transpose()?
        .unwrap_or_default(),
    })
  }

  /// Total order over jobs: the sort key first, then the id
  pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
    let by_key = match self.field {
      SortField::PostingDate => a.posted_at.cmp(&b.posted_at),
      SortField::ExpiryDate => a.expires_at.cmp(&b.expires_at),
      SortField::Title => a
        .title
        .value()
        .to_lowercase()
        .cmp(&b.title.value().to_lowercase()),
      SortField::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
      SortField::Salary => a.salary.cmp(&b.salary),
      SortField::Positions => a.positions.cmp(&b.positions),
      SortField::Id => Ordering::Equal,
    };
    let ordering = by_key.then_with(|| a.id.cmp(&b.id));

    match self.order {
      SortOrder::Asc => ordering,
      SortOrder::Desc => ordering.reverse(),
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct ListJobsQuery {
  pub filter: JobFilter,
  pub page: Option<PageRequest>,
  pub sort: SortSpec,
}

/// One page of results plus what is needed to navigate to the neighbouring pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionResponse<T> {
  pub items: Vec<T>,
  pub total_count: usize,
  pub page: u32,
  pub limit: u32,
  pub previous_page: Option<u32>,
  pub next_page: Option<u32>,
}

impl<T> CollectionResponse<T> {
  pub fn map<U>(self, f: impl FnMut(T) -> U) -> CollectionResponse<U> {
    CollectionResponse {
      items: self.items.into_iter().map(f).collect(),
      total_count: self.total_count,
      page: self.page,
      limit: self.limit,
      previous_page: self.previous_page,
      next_page: self.next_page,
    }
  }
}

/// Slices an already ordered candidate list. Out-of-range pages yield no items.
pub fn paginate<T>(candidates: Vec<T>, request: PageRequest) -> CollectionResponse<T> {
  let total_count = candidates.len();
  let limit = request.limit() as usize;
  let offset = request.offset();

  let items: Vec<T> = candidates.into_iter().skip(offset).take(limit).collect();

  let next_page = (offset.saturating_add(limit) < total_count).then(|| request.page() + 1);
  let previous_page = (offset > 0 && total_count > 0).then(|| {
    let last_page = total_count.div_ceil(limit) as u32;
    (request.page() - 1).min(last_page)
  });

  CollectionResponse {
    items,
    total_count,
    page: request.page(),
    limit: request.limit(),
    previous_page,
    next_page,
  }
}

pub struct JobQueryEngine {
  job_repo: Arc<dyn JobRepository>,
  limits: PaginationLimits,
}

impl JobQueryEngine {
  pub fn new(job_repo: Arc<dyn JobRepository>, limits: PaginationLimits) -> Self {
    Self { job_repo, limits }
  }

  pub fn limits(&self) -> &PaginationLimits {
    &self.limits
  }

  pub async fn list(&self, query: &ListJobsQuery) -> Result<CollectionResponse<Job>, JobError> {
    let page = match query.page {
      Some(page) => page,
      None => PageRequest::new(1, self.limits.default_limit)?,
    };

    let mut candidates = self.job_repo.find_all_matching(&query.filter).await?;
    candidates.sort_by(|a, b| query.sort.compare(a, b));

    tracing::debug!(
      candidates = candidates.len(),
      page = page.page(),
      limit = page.limit(),
      "Listing jobs"
    );

    Ok(paginate(candidates, page))
  }
}
