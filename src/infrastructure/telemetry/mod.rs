mod prometheus_recorder;

pub use prometheus_recorder::PrometheusCleanupRecorder;
