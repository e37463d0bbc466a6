//! Configuration management for the stub backends
//!
//! Loads configuration from config.toml at startup. Every value has a default
//! matching the hard-coded backends, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Stub backend configuration
///
/// Loaded from config.toml at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,

    /// Backends to serve, in startup order
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,
}

/// A single static responder: where it listens and what it answers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Display name used in the startup banner
    pub name: String,

    /// Bind address, loopback unless overridden
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listening port (0 picks an ephemeral port)
    pub port: u16,

    /// HTML body returned for every request
    pub body: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            backends: default_backends(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
        }
    }
}

impl BackendConfig {
    /// Create a loopback backend
    pub fn new(name: impl Into<String>, port: u16, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: default_host(),
            port,
            body: body.into(),
        }
    }

    /// First backend: port 8081
    pub fn backend_one() -> Self {
        Self::new("Backend 1", 8081, "<h1>Response from Backend 1</h1>")
    }

    /// Second backend: port 8083
    ///
    /// Announces itself as "Backend 3" while its body reads "Backend 2".
    pub fn backend_two() -> Self {
        Self::new("Backend 3", 8083, "<h1>Response from Backend 2</h1>")
    }

    /// Socket address to bind
    #[inline]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Startup line printed to stdout
    pub fn banner(&self, port: u16) -> String {
        format!("{} running on port {}", self.name, port)
    }
}

fn default_backends() -> Vec<BackendConfig> {
    vec![BackendConfig::backend_one(), BackendConfig::backend_two()]
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be parsed or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(ConfigError::IoError(e)),
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations where two backends would fight over one port
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for backend in &self.backends {
            if backend.port != 0 && !seen.insert(backend.addr()) {
                return Err(ConfigError::Invalid(format!(
                    "{} reuses address {}",
                    backend.name,
                    backend.addr()
                )));
            }
        }
        Ok(())
    }

    /// Find a backend by its display name
    pub fn backend(&self, name: &str) -> Option<&BackendConfig> {
        self.backends.iter().find(|b| b.name == name)
    }

    /// Configured backend with the preset's name, or the preset itself
    pub fn backend_or(&self, preset: BackendConfig) -> BackendConfig {
        self.backend(&preset.name).cloned().unwrap_or(preset)
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading file
    IoError(std::io::Error),
    /// Parse error (invalid TOML)
    ParseError(String),
    /// Parsed but unusable
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(_) | ConfigError::Invalid(_) => None,
        }
    }
}

impl From<ConfigError> for crate::BackendError {
    fn from(e: ConfigError) -> Self {
        crate::BackendError::Config(e.to_string())
    }
}
