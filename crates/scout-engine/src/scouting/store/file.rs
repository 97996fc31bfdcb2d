use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::{ReportSink, SinkError};
use crate::scouting::report::{Report, ReportId};

/// Sink storing the whole report collection as one JSON document on disk.
///
/// Every write lands in a sibling temp file that is renamed over the document, so a failed
/// append or delete leaves the previous collection intact.
#[derive(Debug)]
pub struct JsonFileReportSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Report>, SinkError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&self, reports: &[Report]) -> Result<(), SinkError> {
        let payload = serde_json::to_vec_pretty(reports)?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "reports.json".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&payload)?;
        file.sync_all()?;
        drop(file);

        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        debug!(path = %self.path.display(), reports = reports.len(), "report store written");
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, SinkError> {
        self.write_lock
            .lock()
            .map_err(|_| SinkError::Unavailable("file sink mutex poisoned".to_string()))
    }
}

impl ReportSink for JsonFileReportSink {
    fn append(&self, report: Report) -> Result<ReportId, SinkError> {
        let _guard = self.guard()?;
        let mut reports = self.load()?;
        if reports.iter().any(|existing| existing.id == report.id) {
            return Err(SinkError::Conflict(report.id));
        }
        let id = report.id.clone();
        reports.push(report);
        self.persist(&reports)?;
        Ok(id)
    }

    fn read_all(&self) -> Result<Vec<Report>, SinkError> {
        let _guard = self.guard()?;
        self.load()
    }

    fn delete(&self, id: &ReportId) -> Result<bool, SinkError> {
        let _guard = self.guard()?;
        let mut reports = self.load()?;
        let before = reports.len();
        reports.retain(|report| &report.id != id);
        if reports.len() == before {
            return Ok(false);
        }
        self.persist(&reports)?;
        Ok(true)
    }
}
