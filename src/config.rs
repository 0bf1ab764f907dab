//! Server configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub listen_addr: String,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Attach a permissive CORS layer
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            log_level: "info".into(),
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    /// Read a TOML file. Keys left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, or the file when one is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line values on top of file values.
    pub fn with_overrides(mut self, listen: Option<String>, log_level: Option<String>) -> Self {
        if let Some(listen) = listen {
            self.listen_addr = listen;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = ServerConfig::load(None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen_addr = \"127.0.0.1:9000\"").unwrap();
        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.log_level, "info");
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = ServerConfig::default()
            .with_overrides(Some("127.0.0.1:1".into()), None);
        assert_eq!(config.listen_addr, "127.0.0.1:1");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(ServerConfig::load(Some(&missing)), Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "cors_permissive = \"maybe\"").unwrap();
        assert!(matches!(ServerConfig::load(Some(&bad)), Err(ConfigError::Parse { .. })));
    }
}
