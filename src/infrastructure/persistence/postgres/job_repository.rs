use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::job::{
  Application, ContactEmail, Education, Experience, Industry, Job, JobDescription, JobError,
  JobFilter, JobRepository, JobTitle, JobType, Positions, Salary, Slug,
};
use crate::domain::storage::{FileRef, OrphanedFiles};

const JOB_COLUMNS: &str = r#"
    j.id, j.owner_id, j.title, j.slug, j.description, j.email, j.address, j.company,
    j.industries, j.job_type, j.min_education, j.experience, j.salary, j.positions,
    j.posted_at, j.expires_at
"#;

/// PostgreSQL implementation of the JobRepository trait
pub struct PostgresJobRepository {
  pool: PgPool,
}

impl PostgresJobRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn load_applications(
    &self,
    job_ids: &[Uuid],
  ) -> Result<HashMap<Uuid, BTreeMap<Uuid, Application>>, JobError> {
    let rows = sqlx::query_as::<_, ApplicationRow>(
      r#"
            SELECT job_id, user_id, resume, applied_at
            FROM job_applications
            WHERE job_id = ANY($1)
            "#,
    )
    .bind(job_ids)
    .fetch_all(&self.pool)
    .await?;

    let mut by_job: HashMap<Uuid, BTreeMap<Uuid, Application>> = HashMap::new();
    for row in rows {
      by_job.entry(row.job_id).or_default().insert(
        row.user_id,
        Application {
          resume: row.resume,
          applied_at: row.applied_at,
        },
      );
    }
    Ok(by_job)
  }

  async fn hydrate(&self, rows: Vec<JobRow>) -> Result<Vec<Job>, JobError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut applications = self.load_applications(&ids).await?;

    rows
      .into_iter()
      .map(|row| {
        let mut job = Job::try_from(row)?;
        job.applications = applications.remove(&job.id).unwrap_or_default();
        Ok(job)
      })
      .collect()
  }
}

#[derive(Debug, sqlx::FromRow)]
struct JobRow {
  id: Uuid,
  owner_id: Uuid,
  title: String,
  slug: String,
  description: String,
  email: String,
  address: String,
  company: String,
  industries: Vec<String>,
  job_type: String,
  min_education: String,
  experience: String,
  salary: Decimal,
  positions: i32,
  posted_at: DateTime<Utc>,
  expires_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
  job_id: Uuid,
  user_id: Uuid,
  resume: String,
  applied_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
  type Error = JobError;

  fn try_from(row: JobRow) -> Result<Self, Self::Error> {
    let corrupt = |e: crate::domain::job::ValueObjectError| {
      JobError::Repository(format!("Invalid job row {}: {}", row.id, e))
    };

    let industries = row
      .industries
      .iter()
      .map(|s| Industry::from_str(s))
      .collect::<Result<Vec<_>, _>>()
      .map_err(corrupt)?;

    Ok(Job {
      id: row.id,
      owner_id: row.owner_id,
      title: JobTitle::new(row.title.clone()).map_err(corrupt)?,
      slug: Slug::from_stored(row.slug.clone()),
      description: JobDescription::new(row.description.clone()).map_err(corrupt)?,
      email: ContactEmail::new(row.email.clone()).map_err(corrupt)?,
      address: row.address.clone(),
      company: row.company.clone(),
      industries,
      job_type: JobType::from_str(&row.job_type).map_err(corrupt)?,
      min_education: Education::from_str(&row.min_education).map_err(corrupt)?,
      experience: Experience::from_str(&row.experience).map_err(corrupt)?,
      salary: Salary::new(row.salary).map_err(corrupt)?,
      positions: Positions::new(u32::try_from(row.positions).unwrap_or(0)).map_err(corrupt)?,
      posted_at: row.posted_at,
      expires_at: row.expires_at,
      applications: BTreeMap::new(),
    })
  }
}

fn industry_names(job: &Job) -> Vec<String> {
  job
    .industries
    .iter()
    .map(|i| i.as_str().to_string())
    .collect()
}

/// Wraps a user supplied fragment for ILIKE, escaping its wildcards
fn like_pattern(fragment: &str) -> String {
  let escaped = fragment
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{}%", escaped)
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, JobError> {
    let row = sqlx::query_as::<_, JobRow>(&format!(
      "SELECT {} FROM jobs j WHERE j.id = $1",
      JOB_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
      None => Ok(None),
    }
  }

  async fn find_all_matching(&self, filter: &JobFilter) -> Result<Vec<Job>, JobError> {
    let mut query: QueryBuilder<Postgres> =
      QueryBuilder::new(format!("SELECT {} FROM jobs j WHERE TRUE", JOB_COLUMNS));

    if let Some(title) = &filter.title {
      query.push(" AND j.title ILIKE ").push_bind(like_pattern(title));
    }
    if let Some(description) = &filter.description {
      query
        .push(" AND j.description ILIKE ")
        .push_bind(like_pattern(description));
    }
    if let Some(company) = &filter.company {
      query
        .push(" AND j.company ILIKE ")
        .push_bind(like_pattern(company));
    }
    if !filter.industries.is_empty() {
      let names: Vec<String> = filter
        .industries
        .iter()
        .map(|i| i.as_str().to_string())
        .collect();
      query.push(" AND j.industries && ").push_bind(names);
    }
    if let Some(job_type) = filter.job_type {
      query
        .push(" AND j.job_type = ")
        .push_bind(job_type.as_str());
    }
    if let Some(education) = filter.min_education {
      query
        .push(" AND j.min_education = ")
        .push_bind(education.as_str());
    }
    if let Some(owner_id) = filter.posted_by {
      query.push(" AND j.owner_id = ").push_bind(owner_id);
    }
    if let Some(user_id) = filter.applied_by {
      query
        .push(" AND EXISTS (SELECT 1 FROM job_applications a WHERE a.job_id = j.id AND a.user_id = ")
        .push_bind(user_id)
        .push(")");
    }

    let rows = query
      .build_query_as::<JobRow>()
      .fetch_all(&self.pool)
      .await?;

    tracing::debug!(rows = rows.len(), "Matched jobs");
    self.hydrate(rows).await
  }

  async fn create(&self, job: Job) -> Result<Job, JobError> {
    sqlx::query(
      r#"
            INSERT INTO jobs (
                id, owner_id, title, slug, description, email, address, company,
                industries, job_type, min_education, experience, salary, positions,
                posted_at, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
    )
    .bind(job.id)
    .bind(job.owner_id)
    .bind(job.title.value())
    .bind(job.slug.value())
    .bind(job.description.value())
    .bind(job.email.value())
    .bind(&job.address)
    .bind(&job.company)
    .bind(industry_names(&job))
    .bind(job.job_type.as_str())
    .bind(job.min_education.as_str())
    .bind(job.experience.as_str())
    .bind(job.salary.amount())
    .bind(job.positions.count() as i32)
    .bind(job.posted_at)
    .bind(job.expires_at)
    .execute(&self.pool)
    .await?;

    Ok(job)
  }

  async fn update(&self, job: Job) -> Result<Job, JobError> {
    let result = sqlx::query(
      r#"
            UPDATE jobs
            SET
                title = $2,
                slug = $3,
                description = $4,
                email = $5,
                address = $6,
                company = $7,
                industries = $8,
                job_type = $9,
                min_education = $10,
                experience = $11,
                salary = $12,
                positions = $13
            WHERE id = $1
            "#,
    )
    .bind(job.id)
    .bind(job.title.value())
    .bind(job.slug.value())
    .bind(job.description.value())
    .bind(job.email.value())
    .bind(&job.address)
    .bind(&job.company)
    .bind(industry_names(&job))
    .bind(job.job_type.as_str())
    .bind(job.min_education.as_str())
    .bind(job.experience.as_str())
    .bind(job.salary.amount())
    .bind(job.positions.count() as i32)
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(JobError::JobNotFound(job.id));
    }

    self
      .find_by_id(job.id)
      .await?
      .ok_or(JobError::JobNotFound(job.id))
  }

  async fn delete(&self, id: Uuid) -> Result<OrphanedFiles, JobError> {
    let mut tx = self.pool.begin().await?;

    let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
      .bind(id)
      .fetch_optional(&mut *tx)
      .await?;
    if locked.is_none() {
      return Err(JobError::JobNotFound(id));
    }

    let resumes: Vec<(String,)> =
      sqlx::query_as("DELETE FROM job_applications WHERE job_id = $1 RETURNING resume")
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM jobs WHERE id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;

    Ok(
      resumes
        .into_iter()
        .map(|(resume,)| FileRef::private(resume))
        .collect(),
    )
  }

  async fn apply(
    &self,
    job_id: Uuid,
    user_id: Uuid,
    resume: String,
    applied_at: DateTime<Utc>,
  ) -> Result<(), JobError> {
    let result = sqlx::query(
      r#"
            INSERT INTO job_applications (job_id, user_id, resume, applied_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (job_id, user_id) DO NOTHING
            "#,
    )
    .bind(job_id)
    .bind(user_id)
    .bind(&resume)
    .bind(applied_at)
    .execute(&self.pool)
    .await;

    match result {
      Ok(done) if done.rows_affected() == 0 => Err(JobError::AlreadyApplied { job_id, user_id }),
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
        Err(JobError::JobNotFound(job_id))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn remove_applications_by_user(&self, user_id: Uuid) -> Result<OrphanedFiles, JobError> {
    let resumes: Vec<(String,)> =
      sqlx::query_as("DELETE FROM job_applications WHERE user_id = $1 RETURNING resume")
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

    Ok(
      resumes
        .into_iter()
        .map(|(resume,)| FileRef::private(resume))
        .collect(),
    )
  }
}
