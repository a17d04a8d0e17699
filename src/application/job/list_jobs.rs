use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::job::{
  CollectionResponse, Education, Industry, JobError, JobFilter, JobQueryEngine, JobType,
  ListJobsQuery, PaginationLimits,
};

use super::dto::{JobDto, PagingParams, non_empty};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsCommand {
  pub title: Option<String>,
  pub description: Option<String>,
  pub company: Option<String>,
  /// Comma separated industry names
  pub industry: Option<String>,
  pub job_type: Option<String>,
  pub min_education: Option<String>,
  #[serde(flatten)]
  pub paging: PagingParams,
}

pub struct ListJobsUseCase {
  query_engine: Arc<JobQueryEngine>,
}

impl ListJobsUseCase {
  pub fn new(query_engine: Arc<JobQueryEngine>) -> Self {
    Self { query_engine }
  }

  /// Every parameter is validated before the repository is queried
  pub async fn execute(
    &self,
    command: ListJobsCommand,
  ) -> Result<CollectionResponse<JobDto>, JobError> {
    let query = Self::parse(&command, self.query_engine.limits())?;
    let jobs = self.query_engine.list(&query).await?;
    Ok(jobs.map(JobDto::from))
  }

  fn parse(
    command: &ListJobsCommand,
    limits: &PaginationLimits,
  ) -> Result<ListJobsQuery, JobError> {
    let industries = match non_empty(&command.industry) {
      Some(raw) => Industry::parse_list(raw)?,
      None => Vec::new(),
    };
    let job_type = non_empty(&command.job_type)
      .map(JobType::from_str)
      .transpose()?;
    let min_education = non_empty(&command.min_education)
      .map(Education::from_str)
      .transpose()?;
    let (page, sort) = command.paging.parse(limits)?;

    Ok(ListJobsQuery {
      filter: JobFilter {
        title: non_empty(&command.title).map(str::to_string),
        description: non_empty(&command.description).map(str::to_string),
        company: non_empty(&command.company).map(str::to_string),
        industries,
        job_type,
        min_education,
        ..JobFilter::default()
      },
      page: Some(page),
      sort,
    })
  }
}
