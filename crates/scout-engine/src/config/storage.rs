use std::path::PathBuf;

use super::{var, ConfigError};

pub const DEFAULT_STORE_PATH: &str = "scout-reports.json";

/// Where scouting reports are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Reports live for the lifetime of the process only.
    Memory,
    /// Reports are kept in a JSON document at [`StorageConfig::path`].
    File,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            other => Err(ConfigError::InvalidStorageBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

impl StorageConfig {
    pub(super) fn from_env() -> Result<Self, ConfigError> {
        let backend = match var("SCOUT_STORE") {
            Some(raw) => StorageBackend::parse(&raw)?,
            None => StorageBackend::File,
        };

        // Set-but-blank is rejected; unset falls back to the default file.
        let path = match std::env::var_os("SCOUT_STORE_PATH") {
            Some(raw) if raw.to_string_lossy().trim().is_empty() => {
                return Err(ConfigError::EmptyStorePath)
            }
            Some(raw) => PathBuf::from(raw),
            None => PathBuf::from(DEFAULT_STORE_PATH),
        };

        Ok(Self { backend, path })
    }

    /// Points storage at an explicit file. Any configured backend, memory included, is
    /// replaced so reports written through the override outlive the process.
    pub fn override_path(&mut self, path: PathBuf) {
        self.backend = StorageBackend::File;
        self.path = path;
    }
}
