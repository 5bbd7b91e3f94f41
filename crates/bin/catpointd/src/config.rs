//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `catpoint.toml` in the working directory (or the file named by
//! `CATPOINT_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::HashSet;

use serde::Deserialize;

use catpoint_domain::sensor::{Sensor, SensorType};
use catpoint_domain::status::ArmingStatus;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Start-up security state.
    pub security: SecurityConfig,
    /// Sensors registered at start-up.
    pub sensors: Vec<SensorConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Security state applied once the sensors are registered.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub arming_status: ArmingStatus,
}

/// One `[[sensors]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    pub sensor_type: SensorType,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CATPOINT_CONFIG").unwrap_or_else(|_| "catpoint.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CATPOINT_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("CATPOINT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("CATPOINT_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("CATPOINT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        let mut seen = HashSet::new();
        for sensor in &self.sensors {
            if sensor.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "sensor name must not be empty".to_string(),
                ));
            }
            if !seen.insert((sensor.name.as_str(), sensor.sensor_type)) {
                return Err(ConfigError::Validation(format!(
                    "sensor {}/{} is declared twice",
                    sensor.sensor_type, sensor.name
                )));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the configured sensors, all inactive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a sensor fails domain validation.
    pub fn sensors(&self) -> Result<Vec<Sensor>, ConfigError> {
        self.sensors
            .iter()
            .map(|entry| {
                Sensor::builder()
                    .name(entry.name.clone())
                    .sensor_type(entry.sensor_type)
                    .build()
                    .map_err(|err| ConfigError::Validation(err.to_string()))
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "catpointd=info,catpoint_app=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
