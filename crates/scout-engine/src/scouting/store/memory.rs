use std::sync::{Arc, Mutex, MutexGuard};

use super::{ReportSink, SinkError};
use crate::scouting::report::{Report, ReportId};

/// Process-local sink keeping reports in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryReportSink {
    records: Arc<Mutex<Vec<Report>>>,
}

impl MemoryReportSink {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            records: Arc::new(Mutex::new(reports)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Report>>, SinkError> {
        self.records
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink mutex poisoned".to_string()))
    }
}

impl ReportSink for MemoryReportSink {
    fn append(&self, report: Report) -> Result<ReportId, SinkError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == report.id) {
            return Err(SinkError::Conflict(report.id));
        }
        let id = report.id.clone();
        guard.push(report);
        Ok(id)
    }

    fn read_all(&self) -> Result<Vec<Report>, SinkError> {
        Ok(self.lock()?.clone())
    }

    fn delete(&self, id: &ReportId) -> Result<bool, SinkError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|report| &report.id != id);
        Ok(guard.len() != before)
    }
}
