//! Adapter configuration
//!
//! Host and port come from, in increasing priority: built-in defaults, an
//! optional TOML file, and command-line overrides.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 9000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default listening host (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port
pub const DEFAULT_PORT: u16 = 8787;

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// Where the adapter listens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Host or IP to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AdapterConfig {
    /// Load config from a TOML file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply command-line values on top of this config
    #[must_use]
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` for display
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
