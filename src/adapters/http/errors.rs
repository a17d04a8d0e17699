use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::deletion::DeletionError;
use crate::domain::job::JobError;
use crate::domain::user::UserError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Malformed input (400 Bad Request)
  Validation(String),

  /// No usable identity on the request (401 Unauthorized)
  Unauthorized(String),

  /// Authenticated but not allowed (403 Forbidden)
  Forbidden(String),

  /// Referenced resource does not exist (404 Not Found)
  NotFound(String),

  /// Request clashes with current state (409 Conflict)
  Conflict(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Unauthorized(msg) => ("unauthorized", msg.clone()),
      ApiError::Forbidden(msg) => ("forbidden", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<JobError> for ApiError {
  fn from(error: JobError) -> Self {
    match error {
      JobError::Validation(e) => ApiError::Validation(e.to_string()),
      JobError::InvalidQuery(msg) => ApiError::Validation(msg),
      e @ (JobError::JobNotFound(_) | JobError::UserNotFound(_)) => {
        ApiError::NotFound(e.to_string())
      }
      JobError::Forbidden(msg) => ApiError::Forbidden(msg),
      e @ (JobError::AlreadyApplied { .. } | JobError::ApplicationClosed(_)) => {
        ApiError::Conflict(e.to_string())
      }
      e @ (JobError::Repository(_) | JobError::Database(_)) => ApiError::Internal(e.to_string()),
    }
  }
}

impl From<UserError> for ApiError {
  fn from(error: UserError) -> Self {
    match error {
      UserError::Validation(e) => ApiError::Validation(e.to_string()),
      e @ UserError::InvalidResetToken => ApiError::Validation(e.to_string()),
      e @ (UserError::UserNotFound(_) | UserError::EmailNotFound(_)) => {
        ApiError::NotFound(e.to_string())
      }
      e @ UserError::EmailAlreadyExists => ApiError::Conflict(e.to_string()),
      UserError::Forbidden(msg) => ApiError::Forbidden(msg),
      e @ (UserError::Hash(_) | UserError::Repository(_) | UserError::Database(_)) => {
        ApiError::Internal(e.to_string())
      }
    }
  }
}

impl From<DeletionError> for ApiError {
  fn from(error: DeletionError) -> Self {
    match error {
      DeletionError::Forbidden(msg) => ApiError::Forbidden(msg),
      DeletionError::Job(e) => e.into(),
      DeletionError::User(e) => e.into(),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
