//! Environment-supplied configuration.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file by the binaries (`dotenvy::dotenv()`), with the defaults
//! the service has always shipped with: port 8080, debug off.

use chrono_tz::Tz;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://DATABASE.db";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT value {0:?}")]
    Port(String),
    #[error("Unknown time zone {0:?}")]
    TimeZone(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Dev mode: mounts the synthetic data generator
    pub debug: bool,
    pub database_url: String,
    /// Zone that stored UTC timestamps are rendered in
    pub timezone: Tz,
    pub auto_migrate: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            debug: false,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE,
            auto_migrate: false,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Port(port.clone()))?;
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            config.database_url = url;
        }

        if let Some(tz) = lookup("DISPLAY_TZ").filter(|s| !s.trim().is_empty()) {
            config.timezone = tz
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::TimeZone(tz.clone()))?;
        }

        config.debug = lookup("DEBUG").map(|v| is_truthy(&v)).unwrap_or(false);
        config.auto_migrate = lookup("AUTO_MIGRATE").map(|v| is_truthy(&v)).unwrap_or(false);

        if let Some(format) = lookup("LOG_FORMAT") {
            if format.trim().eq_ignore_ascii_case("json") {
                config.log_format = LogFormat::Json;
            }
        }

        Ok(config)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
