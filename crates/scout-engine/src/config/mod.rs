mod storage;

pub use storage::{StorageBackend, StorageConfig, DEFAULT_STORE_PATH};

use std::env;
use std::fmt;
use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Deployment stage, read from `APP_ENV`. Unrecognized values fall back to development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Everything the scouting service and CLI read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads `.env` when present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: var("APP_ENV")
                .map(|value| AppEnvironment::parse(&value))
                .unwrap_or_default(),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: var("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            storage: StorageConfig::from_env()?,
        })
    }
}

/// Reads a variable, treating unset and blank the same.
pub(crate) fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match var("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host
                .parse::<IpAddr>()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Default filter directive for tracing; `RUST_LOG` overrides it at init.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidHost {
        host: String,
        source: AddrParseError,
    },
    InvalidStorageBackend(String),
    EmptyStorePath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort(raw) => write!(f, "APP_PORT '{raw}' is not a port number"),
            Self::InvalidHost { host, .. } => {
                write!(f, "APP_HOST '{host}' is not an IP address or localhost")
            }
            Self::InvalidStorageBackend(value) => {
                write!(f, "SCOUT_STORE expects 'memory' or 'file', got '{value}'")
            }
            Self::EmptyStorePath => write!(f, "SCOUT_STORE_PATH is empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHost { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    const KEYS: [&str; 6] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "SCOUT_STORE",
        "SCOUT_STORE_PATH",
    ];

    /// Serializes tests that touch the process environment and clears every key we read.
    pub(crate) fn clean_env() -> MutexGuard<'static, ()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        let lock = GUARD
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for key in KEYS {
            env::remove_var(key);
        }
        lock
    }

    #[test]
    fn defaults_apply_without_environment() {
        let _env = clean_env();
        let config = AppConfig::load().expect("defaults load");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(
            config.server.socket_addr().expect("default host parses"),
            SocketAddr::from(([127, 0, 0, 1], 3000))
        );
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let _env = clean_env();
        env::set_var("APP_HOST", "LocalHost");
        env::set_var("APP_PORT", "8088");
        env::set_var("APP_ENV", "prod");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.server.socket_addr().expect("localhost resolves"),
            SocketAddr::from(([127, 0, 0, 1], 8088))
        );
    }

    #[test]
    fn hostnames_other_than_localhost_are_rejected() {
        let _env = clean_env();
        env::set_var("APP_HOST", "pit-laptop.local");
        let config = AppConfig::load().expect("host is checked lazily");
        assert!(matches!(
            config.server.socket_addr(),
            Err(ConfigError::InvalidHost { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let _env = clean_env();
        env::set_var("APP_PORT", "seventy");
        match AppConfig::load() {
            Err(ConfigError::InvalidPort(raw)) => assert_eq!(raw, "seventy"),
            other => panic!("expected invalid port, got {other:?}"),
        }
    }
}
