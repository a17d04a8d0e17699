use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::domain::job::PaginationLimits;
use crate::domain::user::SecurityPolicy;

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_password_reset_ttl() -> i64 {
  1800
}

fn default_user_header() -> String {
  "X-Authenticated-User".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  #[serde(default)]
  pub persistence: PersistenceConfig,
  pub database: DatabaseConfig,
  pub storage: StorageConfig,
  pub security: SecurityConfig,
  #[serde(default)]
  pub listing: ListingConfig,
  #[serde(default)]
  pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceBackend {
  #[default]
  Postgres,
  Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersistenceConfig {
  pub backend: PersistenceBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
  #[default]
  Disk,
  Noop,
}

/// Where uploaded avatars (public) and resumes (private) live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  #[serde(default)]
  pub backend: StorageBackend,
  pub public_dir: PathBuf,
  pub private_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
  pub password_min_length: usize,
  #[serde(default = "default_password_reset_ttl")]
  pub password_reset_ttl_seconds: i64,
}

impl SecurityConfig {
  pub fn policy(&self) -> SecurityPolicy {
    SecurityPolicy {
      password_min_length: self.password_min_length,
      reset_token_ttl: chrono::Duration::seconds(self.password_reset_ttl_seconds),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
  pub default_limit: u32,
  pub max_limit: u32,
}

impl Default for ListingConfig {
  fn default() -> Self {
    let limits = PaginationLimits::default();
    Self {
      default_limit: limits.default_limit,
      max_limit: limits.max_limit,
    }
  }
}

impl ListingConfig {
  pub fn limits(&self) -> PaginationLimits {
    PaginationLimits {
      default_limit: self.default_limit,
      max_limit: self.max_limit,
    }
  }
}

/// Identity is established upstream and forwarded in a trusted header
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
  #[serde(default = "default_user_header")]
  pub user_header: String,
}

impl Default for AuthConfig {
  fn default() -> Self {
    Self {
      user_header: default_user_header(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with the JOBBOARD_ prefix, sections separated by `__`,
  ///    e.g. `JOBBOARD_SERVER__PORT=8080` or `JOBBOARD_PERSISTENCE__BACKEND=memory`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if the default file is missing or a value has the wrong type
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("JOBBOARD")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let config: Config = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    let listing = &self.listing;
    if listing.max_limit == 0 || listing.default_limit == 0 || listing.default_limit > listing.max_limit
    {
      return Err(ConfigError::Message(format!(
        "listing limits must satisfy 1 <= default_limit ({}) <= max_limit ({})",
        listing.default_limit, listing.max_limit
      )));
    }
    if self.security.password_reset_ttl_seconds <= 0 {
      return Err(ConfigError::Message(
        "security.password_reset_ttl_seconds must be positive".to_string(),
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL: &str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            base_url = "http://localhost:8080"

            [database]
            url = "postgres://localhost/jobboard"
            max_connections = 5

            [storage]
            public_dir = "./data/public"
            private_dir = "./data/private"

            [security]
            password_min_length = 8
        "#;

  #[test]
  fn test_config_structure() {
    let config: Config = toml::from_str(MINIMAL).expect("Failed to parse config");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.persistence.backend, PersistenceBackend::Postgres);
    assert_eq!(config.database.connect_timeout_seconds, 5);
    assert_eq!(config.database.acquire_timeout_seconds, 3);
    assert_eq!(config.storage.backend, StorageBackend::Disk);
    assert_eq!(config.security.password_reset_ttl_seconds, 1800);
    assert_eq!(config.listing.limits(), PaginationLimits::default());
    assert_eq!(config.auth.user_header, "X-Authenticated-User");
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_config_backends_and_limits() {
    let toml = format!(
      "{}\n{}",
      MINIMAL,
      r#"
            [persistence]
            backend = "memory"

            [listing]
            default_limit = 20
            max_limit = 10
        "#
    );

    let config: Config = toml::from_str(&toml).expect("Failed to parse config");

    assert_eq!(config.persistence.backend, PersistenceBackend::Memory);
    assert!(config.validate().is_err());
  }
}
