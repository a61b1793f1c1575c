//! Server configuration.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line flags. Every key in the file is optional:
//!
//! ```toml
//! bind_address = "0.0.0.0"
//! port = 8080
//! log_level = "info,propcalc_server=debug"
//! log_file = "propcalc.log"
//! pdf_title = "Acme Property Advisory"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on, e.g. `127.0.0.1` or `0.0.0.0`.
    pub bind_address: String,
    pub port: u16,
    /// Bare level (`info`) or any `EnvFilter` directive. `RUST_LOG` wins
    /// when set.
    pub log_level: String,
    /// Also append log records to this file.
    pub log_file: Option<PathBuf>,
    /// Shown in the header and title block of PDF summaries.
    pub pdf_title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_file: None,
            pdf_title: "Property Calculator".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();

        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_its_keys() {
        let config = ServerConfig::from_toml_str(
            r#"
            port = 9000
            pdf_title = "Acme"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.pdf_title, "Acme");
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let result = ServerConfig::from_toml_str("port = \"eighty\"");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn socket_addr_combines_address_and_port() {
        let config = ServerConfig {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            ..ServerConfig::default()
        };

        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn hostname_is_not_an_address() {
        let config = ServerConfig {
            bind_address: "localhost".to_string(),
            ..ServerConfig::default()
        };

        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ServerConfig::load(Path::new("/nonexistent/propcalc.toml")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/propcalc.toml"));
    }
}
