//! Service configuration: bind address, body limit and log filter.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const C_LOG_FILTER_DEFAULT: &str = "reqkit_server=info,reqkit_report=info,warn";

/// Failure while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Command-line arguments of the report server binary.
#[derive(Debug, Parser)]
#[command(about = "Serve requisition reports as XLSX downloads.")]
pub struct ServerArgs {
    /// TOML config file; defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Top-level service configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file; absent keys take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply a `PORT` override; unparsable values are ignored.
    pub fn with_port_override(mut self, port: Option<&str>) -> Self {
        if let Some(n_port) = port.and_then(|c_port| c_port.trim().parse::<u16>().ok()) {
            self.port = n_port;
        }
        self
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    32 * 1024 * 1024
}

fn default_log_filter() -> String {
    C_LOG_FILTER_DEFAULT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = ServiceConfig::from_toml_str("port = 9000\n").expect("config");
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_body_bytes, 32 * 1024 * 1024);
        assert_eq!(config.log_filter, C_LOG_FILTER_DEFAULT);
    }

    #[test]
    fn test_server_args_config_flag() {
        let args = ServerArgs::try_parse_from(["reqkit_server", "--config", "reqkit.toml"])
            .expect("args");
        assert_eq!(args.config, Some(PathBuf::from("reqkit.toml")));
        assert!(ServerArgs::try_parse_from(["reqkit_server"]).expect("args").config.is_none());
        assert!(ServerArgs::try_parse_from(["reqkit_server", "--config"]).is_err());
        assert!(ServerArgs::try_parse_from(["reqkit_server", "--port", "1"]).is_err());
    }

    #[test]
    fn test_port_override() {
        let config = ServiceConfig::default().with_port_override(Some("9100"));
        assert_eq!(config.bind_addr(), "0.0.0.0:9100");
        let config = config.with_port_override(Some("not-a-port"));
        assert_eq!(config.port, 9100);
        assert_eq!(ServiceConfig::default().with_port_override(None).port, 8080);
    }

    #[test]
    fn test_from_file_missing_path() {
        let err = ServiceConfig::from_file("/nonexistent/reqkit.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(ServiceConfig::from_toml_str("port = \"abc\"").is_err());
    }
}
