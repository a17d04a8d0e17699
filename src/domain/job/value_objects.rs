use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
  static ref SLUG_SEPARATORS: Regex =
    Regex::new(r"[^\p{L}\p{N}]+").expect("slug separator pattern is valid");
}

const TITLE_MAX_LEN: usize = 100;
const DESCRIPTION_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid job title: {0}")]
  InvalidTitle(String),
  #[error("Invalid job description: {0}")]
  InvalidDescription(String),
  #[error("Invalid contact email: {0}")]
  InvalidEmail(String),
  #[error("Invalid industry: {0}")]
  InvalidIndustry(String),
  #[error("Invalid job type: {0}")]
  InvalidJobType(String),
  #[error("Invalid education: {0}")]
  InvalidEducation(String),
  #[error("Invalid experience: {0}")]
  InvalidExperience(String),
  #[error("Invalid salary: {0}")]
  InvalidSalary(String),
  #[error("Invalid number of positions: {0}")]
  InvalidPositions(String),
  #[error("Invalid dates: {0}")]
  InvalidDates(String),
  #[error("Missing required field: {0}")]
  MissingField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitle(String);

impl JobTitle {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidTitle(
        "Job title cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
      return Err(ValueObjectError::InvalidTitle(format!(
        "Job title can not exceed {} characters",
        TITLE_MAX_LEN
      )));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for JobTitle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// URL-friendly form of a job title, always derived, never user supplied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug(String);

impl Slug {
  pub fn from_title(title: &JobTitle) -> Self {
    let lowered = title.value().to_lowercase();
    let slug = SLUG_SEPARATORS.replace_all(&lowered, "-");
    Self(slug.trim_matches('-').to_string())
  }

  /// Rebuilds a slug read back from storage
  pub fn from_stored(value: String) -> Self {
    Self(value)
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Slug {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription(String);

impl JobDescription {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    if value.trim().is_empty() {
      return Err(ValueObjectError::InvalidDescription(
        "Job description cannot be empty".to_string(),
      ));
    }
    if value.chars().count() > DESCRIPTION_MAX_LEN {
      return Err(ValueObjectError::InvalidDescription(format!(
        "Job description can not exceed {} characters",
        DESCRIPTION_MAX_LEN
      )));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEmail(String);

impl ContactEmail {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into().trim().to_string();
    match value.split_once('@') {
      Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(Self(value)),
      _ => Err(ValueObjectError::InvalidEmail(value)),
    }
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Industry {
  #[serde(rename = "Business")]
  Business,
  #[serde(rename = "Information Technology")]
  InformationTechnology,
  #[serde(rename = "Banking")]
  Banking,
  #[serde(rename = "Education/Training")]
  EducationTraining,
  #[serde(rename = "Telecommunication")]
  Telecommunication,
  #[serde(rename = "Others")]
  Others,
}

impl Industry {
  pub fn as_str(&self) -> &'static str {
    match self {
      Industry::Business => "Business",
      Industry::InformationTechnology => "Information Technology",
      Industry::Banking => "Banking",
      Industry::EducationTraining => "Education/Training",
      Industry::Telecommunication => "Telecommunication",
      Industry::Others => "Others",
    }
  }

  /// Parses a comma separated list, e.g. `Banking,Business`
  pub fn parse_list(value: &str) -> Result<Vec<Industry>, ValueObjectError> {
    value
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(Industry::from_str)
      .collect()
  }
}

impl FromStr for Industry {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "business" => Ok(Industry::Business),
      "information technology" => Ok(Industry::InformationTechnology),
      "banking" => Ok(Industry::Banking),
      "education/training" => Ok(Industry::EducationTraining),
      "telecommunication" => Ok(Industry::Telecommunication),
      "others" => Ok(Industry::Others),
      _ => Err(ValueObjectError::InvalidIndustry(s.to_string())),
    }
  }
}

impl fmt::Display for Industry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
  Permanent,
  Temporary,
  Internship,
}

impl JobType {
  pub fn as_str(&self) -> &'static str {
    match self {
      JobType::Permanent => "Permanent",
      JobType::Temporary => "Temporary",
      JobType::Internship => "Internship",
    }
  }
}

impl FromStr for JobType {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "permanent" => Ok(JobType::Permanent),
      "temporary" => Ok(JobType::Temporary),
      "internship" => Ok(JobType::Internship),
      _ => Err(ValueObjectError::InvalidJobType(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Education {
  Bachelors,
  Masters,
  Phd,
}

impl Education {
  pub fn as_str(&self) -> &'static str {
    match self {
      Education::Bachelors => "Bachelors",
      Education::Masters => "Masters",
      Education::Phd => "Phd",
    }
  }
}

impl FromStr for Education {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "bachelors" => Ok(Education::Bachelors),
      "masters" => Ok(Education::Masters),
      "phd" => Ok(Education::Phd),
      _ => Err(ValueObjectError::InvalidEducation(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Experience {
  #[serde(rename = "No Experience")]
  NoExperience,
  #[serde(rename = "1 Year - 2 Years")]
  OneToTwoYears,
  #[serde(rename = "2 Years - 5 Years")]
  TwoToFiveYears,
  #[serde(rename = "5 Years+")]
  FiveYearsPlus,
}

impl Experience {
  pub fn as_str(&self) -> &'static str {
    match self {
      Experience::NoExperience => "No Experience",
      Experience::OneToTwoYears => "1 Year - 2 Years",
      Experience::TwoToFiveYears => "2 Years - 5 Years",
      Experience::FiveYearsPlus => "5 Years+",
    }
  }
}

impl FromStr for Experience {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "no experience" => Ok(Experience::NoExperience),
      "1 year - 2 years" => Ok(Experience::OneToTwoYears),
      "2 years - 5 years" => Ok(Experience::TwoToFiveYears),
      "5 years+" => Ok(Experience::FiveYearsPlus),
      _ => Err(ValueObjectError::InvalidExperience(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Salary(Decimal);

impl Salary {
  pub fn new(amount: Decimal) -> Result<Self, ValueObjectError> {
    if amount < Decimal::ZERO {
      return Err(ValueObjectError::InvalidSalary(
        "Salary cannot be negative".to_string(),
      ));
    }
    Ok(Self(amount))
  }

  pub fn amount(&self) -> Decimal {
    self.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Positions(u32);

impl Positions {
  pub fn new(count: u32) -> Result<Self, ValueObjectError> {
    if count == 0 {
      return Err(ValueObjectError::InvalidPositions(
        "At least one position is required".to_string(),
      ));
    }
    Ok(Self(count))
  }

  pub fn count(&self) -> u32 {
    self.0
  }
}

impl Default for Positions {
  fn default() -> Self {
    Self(1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_slug_from_title() {
    let title = JobTitle::new("  Senior Rust Developer (Remote)  ").unwrap();
    assert_eq!(Slug::from_title(&title).value(), "senior-rust-developer-remote");
  }

  #[test]
  fn test_slug_collapses_separators() {
    let title = JobTitle::new("C++ / Embedded -- Engineer").unwrap();
    assert_eq!(Slug::from_title(&title).value(), "c-embedded-engineer");
  }

  #[test]
  fn test_slug_keeps_unicode_letters() {
    let title = JobTitle::new("Développeur Rust, Zürich").unwrap();
    assert_eq!(Slug::from_title(&title).value(), "développeur-rust-zürich");
  }

  #[test]
  fn test_title_length_limit() {
    assert!(JobTitle::new("a".repeat(100)).is_ok());
    assert!(JobTitle::new("a".repeat(101)).is_err());
    assert!(JobTitle::new("   ").is_err());
  }

  #[test]
  fn test_industry_parse_list() {
    let industries = Industry::parse_list("Banking, information technology").unwrap();
    assert_eq!(
      industries,
      vec![Industry::Banking, Industry::InformationTechnology]
    );
    assert!(Industry::parse_list("Banking,Farming").is_err());
  }

  #[test]
  fn test_enum_round_trip_through_str() {
    assert_eq!(
      Experience::from_str(Experience::TwoToFiveYears.as_str()).unwrap(),
      Experience::TwoToFiveYears
    );
    assert_eq!(JobType::from_str("internship").unwrap(), JobType::Internship);
    assert!(Education::from_str("Highschool").is_err());
  }

  #[test]
  fn test_salary_rejects_negative() {
    assert!(Salary::new(dec!(0)).is_ok());
    assert!(Salary::new(dec!(1200.50)).is_ok());
    assert!(Salary::new(dec!(-1)).is_err());
  }

  #[test]
  fn test_contact_email() {
    assert!(ContactEmail::new("jobs@acme.io").is_ok());
    assert!(ContactEmail::new("not-an-email").is_err());
  }
}
