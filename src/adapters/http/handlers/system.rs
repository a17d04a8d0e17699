use actix_web::{HttpResponse, http::header::ContentType, web};
use std::sync::Arc;

use crate::adapters::http::{dtos::HealthResponse, errors::ApiError};
use crate::infrastructure::telemetry::PrometheusCleanupRecorder;

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// GET /metrics
///
/// Prometheus text exposition format
pub async fn metrics_handler(
  recorder: web::Data<Arc<PrometheusCleanupRecorder>>,
) -> Result<HttpResponse, ApiError> {
  let body = recorder
    .render()
    .map_err(|e| ApiError::Internal(format!("Failed to encode metrics: {}", e)))?;

  Ok(
    HttpResponse::Ok()
      .content_type(ContentType::plaintext())
      .body(body),
  )
}
