use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::job::{JobDto, JobFields, ListJobsCommand, PagingParams};
use crate::domain::job::CollectionResponse;

/// Body for publishing or editing a job
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "Title must be between 1 and 100 characters"
  ))]
  pub title: String,

  #[validate(length(
    min = 1,
    max = 1000,
    message = "Description must be between 1 and 1000 characters"
  ))]
  pub description: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Address is required"))]
  pub address: String,

  #[validate(length(min = 1, message = "Company is required"))]
  pub company: String,

  #[validate(length(min = 1, message = "At least one industry is required"))]
  pub industries: Vec<String>,

  pub job_type: String,
  pub min_education: String,
  pub experience: String,
  pub salary: Decimal,

  #[validate(range(min = 1, message = "Positions must be at least 1"))]
  pub positions: Option<u32>,

  /// Only honoured on creation
  pub expires_at: Option<DateTime<Utc>>,
}

impl JobRequest {
  pub fn into_fields(self) -> JobFields {
    JobFields {
      title: self.title,
      description: self.description,
      email: self.email,
      address: self.address,
      company: self.company,
      industries: self.industries,
      job_type: self.job_type,
      min_education: self.min_education,
      experience: self.experience,
      salary: self.salary,
      positions: self.positions,
    }
  }
}

/// Query string accepted by every paginated listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingQuery {
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub sort_by: Option<String>,
  pub sort_order: Option<String>,
}

impl PagingQuery {
  pub fn to_params(&self) -> PagingParams {
    PagingParams {
      page: self.page,
      limit: self.limit,
      sort_by: self.sort_by.clone(),
      sort_order: self.sort_order.clone(),
    }
  }

  fn link_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_non_empty(&mut pairs, "sortBy", &self.sort_by);
    push_non_empty(&mut pairs, "sortOrder", &self.sort_order);
    pairs
  }
}

/// Query string of the public job search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsQuery {
  pub title: Option<String>,
  pub description: Option<String>,
  pub company: Option<String>,
  /// Comma separated industry names
  pub industry: Option<String>,
  pub job_type: Option<String>,
  pub min_education: Option<String>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub sort_by: Option<String>,
  pub sort_order: Option<String>,
}

impl ListJobsQuery {
  pub fn paging(&self) -> PagingQuery {
    PagingQuery {
      page: self.page,
      limit: self.limit,
      sort_by: self.sort_by.clone(),
      sort_order: self.sort_order.clone(),
    }
  }

  pub fn to_command(&self) -> ListJobsCommand {
    ListJobsCommand {
      title: self.title.clone(),
      description: self.description.clone(),
      company: self.company.clone(),
      industry: self.industry.clone(),
      job_type: self.job_type.clone(),
      min_education: self.min_education.clone(),
      paging: self.paging().to_params(),
    }
  }

  fn link_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    push_non_empty(&mut pairs, "title", &self.title);
    push_non_empty(&mut pairs, "description", &self.description);
    push_non_empty(&mut pairs, "company", &self.company);
    push_non_empty(&mut pairs, "industry", &self.industry);
    push_non_empty(&mut pairs, "jobType", &self.job_type);
    push_non_empty(&mut pairs, "minEducation", &self.min_education);
    pairs.extend(self.paging().link_pairs());
    pairs
  }
}

fn push_non_empty(
  pairs: &mut Vec<(&'static str, String)>,
  key: &'static str,
  value: &Option<String>,
) {
  if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
    pairs.push((key, v.to_string()));
  }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplyRequest {
  /// Key of the resume already uploaded to private storage
  #[validate(length(min = 1, message = "Resume is required"))]
  pub resume: String,
}

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "Name must be between 1 and 100 characters"
  ))]
  pub name: String,

  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// Minimum length is enforced by the configured security policy
  #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
  pub password: String,

  /// `user` or `employer`
  pub role: Option<String>,

  pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[validate(length(
    min = 1,
    max = 100,
    message = "Name must be between 1 and 100 characters"
  ))]
  pub name: String,
  pub headline: Option<String>,
  pub address: Option<String>,
  pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
  #[validate(length(min = 1, message = "Token is required"))]
  pub token: String,

  #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
  pub password: String,

  pub confirm_password: String,
}

/// Page envelope with ready-made links to the neighbouring pages
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCollectionResponse {
  pub items: Vec<JobDto>,
  pub total_count: usize,
  /// Empty when there is no previous page
  pub previous_page: String,
  /// Empty when there is no next page
  pub next_page: String,
}

impl JobCollectionResponse {
  pub fn for_search(
    page: CollectionResponse<JobDto>,
    path: &str,
    query: &ListJobsQuery,
  ) -> Result<Self, serde_urlencoded::ser::Error> {
    Self::with_links(page, path, query.link_pairs())
  }

  pub fn for_listing(
    page: CollectionResponse<JobDto>,
    path: &str,
    query: &PagingQuery,
  ) -> Result<Self, serde_urlencoded::ser::Error> {
    Self::with_links(page, path, query.link_pairs())
  }

  fn with_links(
    page: CollectionResponse<JobDto>,
    path: &str,
    pairs: Vec<(&'static str, String)>,
  ) -> Result<Self, serde_urlencoded::ser::Error> {
    let limit = page.limit;
    let link = |target: Option<u32>| -> Result<String, serde_urlencoded::ser::Error> {
      match target {
        Some(n) => page_link(path, &pairs, n, limit),
        None => Ok(String::new()),
      }
    };

    Ok(Self {
      previous_page: link(page.previous_page)?,
      next_page: link(page.next_page)?,
      total_count: page.total_count,
      items: page.items,
    })
  }
}

fn page_link(
  path: &str,
  pairs: &[(&'static str, String)],
  page: u32,
  limit: u32,
) -> Result<String, serde_urlencoded::ser::Error> {
  let mut params: Vec<(&str, String)> = pairs.to_vec();
  params.push(("page", page.to_string()));
  params.push(("limit", limit.to_string()));
  Ok(format!("{}?{}", path, serde_urlencoded::to_string(&params)?))
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

/// Generic success response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page(previous_page: Option<u32>, next_page: Option<u32>) -> CollectionResponse<JobDto> {
    CollectionResponse {
      items: Vec::new(),
      total_count: 5,
      page: 2,
      limit: 2,
      previous_page,
      next_page,
    }
  }

  #[test]
  fn test_links_keep_filters_and_replace_paging() {
    let query = ListJobsQuery {
      title: Some("rust dev".to_string()),
      industry: Some("Banking,Business".to_string()),
      company: Some("  ".to_string()),
      page: Some(2),
      limit: Some(2),
      sort_order: Some("desc".to_string()),
      ..ListJobsQuery::default()
    };

    let response = JobCollectionResponse::for_search(page(Some(1), Some(3)), "/api/v1/jobs", &query)
      .unwrap();

    assert_eq!(
      response.previous_page,
      "/api/v1/jobs?title=rust+dev&industry=Banking%2CBusiness&sortOrder=desc&page=1&limit=2"
    );
    assert_eq!(
      response.next_page,
      "/api/v1/jobs?title=rust+dev&industry=Banking%2CBusiness&sortOrder=desc&page=3&limit=2"
    );
  }

  #[test]
  fn test_missing_links_render_empty() {
    let response = JobCollectionResponse::for_listing(
      page(None, None),
      "/api/v1/users/1/jobs",
      &PagingQuery::default(),
    )
    .unwrap();

    assert_eq!(response.previous_page, "");
    assert_eq!(response.next_page, "");
    assert_eq!(response.total_count, 5);
  }

  #[test]
  fn test_job_request_validation() {
    let body = serde_json::json!({
      "title": "",
      "description": "Build APIs",
      "email": "not-an-email",
      "address": "Main St 1",
      "company": "Acme",
      "industries": [],
      "jobType": "Permanent",
      "minEducation": "Bachelors",
      "experience": "No Experience",
      "salary": 1000
    });
    let request: JobRequest = serde_json::from_value(body).unwrap();
    let errors = request.validate().unwrap_err();
    let fields = errors.field_errors();

    assert!(fields.contains_key("title"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("industries"));
    assert!(!fields.contains_key("company"));
  }

  #[test]
  fn test_list_query_maps_to_command() {
    let query: ListJobsQuery =
      serde_urlencoded::from_str("title=dev&jobType=Internship&page=2&limit=5&sortBy=salary")
        .unwrap();
    let command = query.to_command();

    assert_eq!(command.title.as_deref(), Some("dev"));
    assert_eq!(command.job_type.as_deref(), Some("Internship"));
    assert_eq!(command.paging.page, Some(2));
    assert_eq!(command.paging.limit, Some(5));
    assert_eq!(command.paging.sort_by.as_deref(), Some("salary"));
  }
}
