use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::domain::storage::{CleanupRecorder, CleanupReport};

const PREFIX: &str = "jobboard";

/// Counts released and failed orphaned-file cleanups, labelled by aggregate
pub struct PrometheusCleanupRecorder {
  registry: Registry,
  released: IntCounterVec,
  failed: IntCounterVec,
}

impl PrometheusCleanupRecorder {
  pub fn new() -> Result<Self, prometheus::Error> {
    let registry = Registry::new();

    let released = IntCounterVec::new(
      Opts::new(
        format!("{PREFIX}_orphaned_files_released_total"),
        "Orphaned files removed from storage after a deletion",
      ),
      &["aggregate"],
    )?;
    let failed = IntCounterVec::new(
      Opts::new(
        format!("{PREFIX}_orphaned_files_failed_total"),
        "Orphaned files that could not be removed from storage",
      ),
      &["aggregate"],
    )?;

    registry.register(Box::new(released.clone()))?;
    registry.register(Box::new(failed.clone()))?;

    #[cfg(target_os = "linux")]
    registry.register(Box::new(
      prometheus::process_collector::ProcessCollector::for_self(),
    ))?;

    Ok(Self {
      registry,
      released,
      failed,
    })
  }

  /// Current metrics in the Prometheus text exposition format
  pub fn render(&self) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
  }
}

impl CleanupRecorder for PrometheusCleanupRecorder {
  fn record(&self, aggregate: &'static str, report: &CleanupReport) {
    self
      .released
      .with_label_values(&[aggregate])
      .inc_by(report.released.len() as u64);
    self
      .failed
      .with_label_values(&[aggregate])
      .inc_by(report.failed.len() as u64);
  }
}
