use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use scout_engine::config::{StorageBackend, StorageConfig};
use scout_engine::scouting::{
    JsonFileReportSink, MemoryReportSink, Report, ReportEvent, ReportId, ReportSink,
    ScoutingService, SinkError,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) store: String,
    pub(crate) started_at: DateTime<Utc>,
}

/// Sink selected at startup from [`StorageConfig`].
pub(crate) enum ConfiguredSink {
    Memory(MemoryReportSink),
    File(JsonFileReportSink),
}

impl ConfiguredSink {
    pub(crate) fn from_config(config: &StorageConfig) -> Self {
        match config.backend {
            StorageBackend::Memory => Self::Memory(MemoryReportSink::default()),
            StorageBackend::File => Self::File(JsonFileReportSink::new(config.path.clone())),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "memory".to_string(),
            Self::File(sink) => format!("file:{}", sink.path().display()),
        }
    }
}

impl ReportSink for ConfiguredSink {
    fn append(&self, report: Report) -> Result<ReportId, SinkError> {
        match self {
            Self::Memory(sink) => sink.append(report),
            Self::File(sink) => sink.append(report),
        }
    }

    fn read_all(&self) -> Result<Vec<Report>, SinkError> {
        match self {
            Self::Memory(sink) => sink.read_all(),
            Self::File(sink) => sink.read_all(),
        }
    }

    fn delete(&self, id: &ReportId) -> Result<bool, SinkError> {
        match self {
            Self::Memory(sink) => sink.delete(id),
            Self::File(sink) => sink.delete(id),
        }
    }
}

/// Logs every change to the report collection until the service is dropped.
pub(crate) fn spawn_change_logger<S>(
    service: &Arc<ScoutingService<S>>,
) -> tokio::task::JoinHandle<()>
where
    S: ReportSink + 'static,
{
    let mut events = service.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ReportEvent::Saved { id, team_number }) => {
                    info!(report_id = %id, team_number, "report collection changed: saved");
                }
                Ok(ReportEvent::Deleted { id }) => {
                    info!(report_id = %id, "report collection changed: deleted");
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "change logger lagged behind report events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn memory_backend_starts_empty() {
        let sink = ConfiguredSink::from_config(&StorageConfig {
            backend: StorageBackend::Memory,
            path: PathBuf::from("unused.json"),
        });
        assert_eq!(sink.describe(), "memory");
        assert!(sink.read_all().expect("memory read").is_empty());
    }

    #[test]
    fn file_backend_points_at_configured_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("event.json");
        let sink = ConfiguredSink::from_config(&StorageConfig {
            backend: StorageBackend::File,
            path: path.clone(),
        });
        assert_eq!(sink.describe(), format!("file:{}", path.display()));
        assert!(!sink
            .delete(&ReportId::from("missing"))
            .expect("delete on empty store"));
    }
}
