//! # Configuration
//!
//! Explicit startup configuration for the service. All settings are
//! collected into an `AppConfig` once at startup and injected into the
//! components that need them; business logic never reads the process
//! environment directly.
//!
//! Precedence: defaults < TOML config file < environment variables.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the token-signing secret
pub const ENV_SECRET: &str = "AUTHORLY_SECRET";
/// Environment variable overriding the listen port
pub const ENV_PORT: &str = "AUTHORLY_PORT";
/// Environment variable overriding the data file path
pub const ENV_DATA: &str = "AUTHORLY_DATA";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },
}

/// On-disk config file shape (all fields optional)
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    secret: Option<String>,
    port: Option<u16>,
    bind: Option<IpAddr>,
    data_path: Option<PathBuf>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Token-signing secret. Startup fails if this is empty: issuing
    /// tokens nobody can verify later would be worse than not starting.
    pub secret: String,
    /// Address to bind
    pub bind: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON snapshot file for the document store. `None` runs fully
    /// in-memory (useful for local experiments; nothing survives restart).
    pub data_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus environment
    /// overrides, then validate.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str::<ConfigFile>(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => ConfigFile::default(),
        };

        let secret = std::env::var(ENV_SECRET)
            .ok()
            .or(file.secret)
            .unwrap_or_default();

        let port = match std::env::var(ENV_PORT) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                field: "port",
                message: "Port must be a number between 1 and 65535",
            })?,
            Err(_) => file.port.unwrap_or(DEFAULT_PORT),
        };

        let data_path = std::env::var(ENV_DATA)
            .ok()
            .map(PathBuf::from)
            .or(file.data_path);

        let config = Self {
            secret,
            bind: file.bind.unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port,
            data_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate resolved values. Rejects configurations that would let the
    /// service start in a broken state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "secret",
                message: "Signing secret must be set (AUTHORLY_SECRET or `secret` in the config file)",
            });
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                message: "Port must be between 1 and 65535",
            });
        }
        Ok(())
    }

    /// Config for tests: fixed secret, in-memory store.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret".to_string(),
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_secret_rejected() {
        let config = AppConfig {
            secret: "  ".to_string(),
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_path: None,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "secret", .. }));
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = AppConfig {
            secret: "s3cret".to_string(),
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_path: None,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "port", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "secret = \"from-file\"\nport = 8080").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        // Environment may override the file in a dev shell; only assert
        // file values when the variables are unset.
        if std::env::var(ENV_SECRET).is_err() {
            assert_eq!(config.secret, "from-file");
        }
        if std::env::var(ENV_PORT).is_err() {
            assert_eq!(config.port, 8080);
        }
        assert_eq!(config.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_unparseable_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml = = =").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
