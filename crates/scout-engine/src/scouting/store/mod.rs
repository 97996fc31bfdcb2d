//! Persistence sinks for scouting reports.

mod file;
mod memory;

pub use file::JsonFileReportSink;
pub use memory::MemoryReportSink;

use super::report::{Report, ReportId};

/// Storage abstraction so the service can be exercised against any backend.
///
/// Sinks only ever append or delete whole reports. A sink may assign its own key on
/// append; the returned id is the canonical one.
pub trait ReportSink: Send + Sync {
    fn append(&self, report: Report) -> Result<ReportId, SinkError>;
    fn read_all(&self) -> Result<Vec<Report>, SinkError>;
    /// Removes a report, returning whether one was present.
    fn delete(&self, id: &ReportId) -> Result<bool, SinkError>;
}

/// Error enumeration for sink failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("report {0} already exists")]
    Conflict(ReportId),
    #[error("report store unavailable: {0}")]
    Unavailable(String),
    #[error("report store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("report store holds invalid data: {0}")]
    Serialization(#[from] serde_json::Error),
}
