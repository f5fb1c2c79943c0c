//! Layered configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `booking.toml` (or the file passed with `--config`), then `BOOKING__*`
//! environment variables such as `BOOKING__ENGINE__HOLD_DURATION_SECS=30`.

use crate::error::{BookingError, Result};
use chrono::TimeDelta;
use config::{ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Reservation engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How long a seat hold lasts
    pub hold_duration_secs: u64,
    /// Period of the background purge; 0 disables it
    pub sweep_interval_secs: u64,
    /// Buffered events per subscriber
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hold_duration_secs: 15,
            sweep_interval_secs: 0,
            event_capacity: 256,
        }
    }
}

impl EngineConfig {
    /// Longest accepted hold, one day
    pub const MAX_HOLD_DURATION_SECS: u64 = 86_400;

    /// Hold duration as a chrono delta
    #[must_use]
    pub fn hold_duration(&self) -> TimeDelta {
        i64::try_from(self.hold_duration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Sweep period, `None` when disabled
    #[must_use]
    pub const fn sweep_interval(&self) -> Option<Duration> {
        if self.sweep_interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.sweep_interval_secs))
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// File looked up in the working directory when no path is given
    pub const DEFAULT_FILE: &'static str = "booking";
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "BOOKING";

    /// Load configuration, requiring `path` to exist when one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(Self::DEFAULT_FILE).required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.engine.hold_duration_secs == 0 {
            return Err(invalid("engine.hold_duration_secs must be at least 1"));
        }
        if self.engine.hold_duration_secs > EngineConfig::MAX_HOLD_DURATION_SECS {
            return Err(invalid(&format!(
                "engine.hold_duration_secs must not exceed {}",
                EngineConfig::MAX_HOLD_DURATION_SECS
            )));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port must not be 0"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> BookingError {
    BookingError::Config(ConfigError::Message(message.to_string()))
}
