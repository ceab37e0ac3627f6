use std::fmt;

use crate::config::env_source::{EnvSource, SystemEnv};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/app.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
// Pool of 5 plus 10 overflow connections
const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_MIN_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SettingsError {
    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("Failed to parse setting '{setting_name}': {error}")]
    ParseError { setting_name: String, error: String },
}

/// Process-level settings needed before the server can start
#[derive(Clone)]
pub struct AppSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    max_connections: u32,
    min_connections: u32,
    sql_logging: bool,
}

impl AppSettings {
    /// Load settings from the given source, applying defaults and validation
    pub fn from_source(env: &dyn EnvSource) -> Result<Self, SettingsError> {
        let database_url = non_empty(env, "DATABASE_URL", DEFAULT_DATABASE_URL)?;
        let server_host = non_empty(env, "HOST", DEFAULT_HOST)?;

        let server_port = match env.var("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let max_connections = parse_u32(env, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(SettingsError::InvalidSetting {
                setting_name: "DATABASE_MAX_CONNECTIONS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let min_connections = parse_u32(
            env,
            "DATABASE_MIN_CONNECTIONS",
            DEFAULT_MIN_CONNECTIONS.min(max_connections),
        )?;
        if min_connections > max_connections {
            return Err(SettingsError::InvalidSetting {
                setting_name: "DATABASE_MIN_CONNECTIONS".to_string(),
                reason: format!("must not exceed DATABASE_MAX_CONNECTIONS ({})", max_connections),
            });
        }

        let sql_logging = match env.var("DATABASE_ECHO") {
            Some(raw) => parse_bool("DATABASE_ECHO", &raw)?,
            None => false,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            max_connections,
            min_connections,
            sql_logging,
        })
    }

    /// Convenience method that reads the process environment
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_source(&SystemEnv)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn min_connections(&self) -> u32 {
        self.min_connections
    }

    pub fn sql_logging(&self) -> bool {
        self.sql_logging
    }

    /// True for `sqlite::memory:` style URLs, where every pooled connection
    /// would otherwise open its own empty database
    pub fn is_in_memory_sqlite(&self) -> bool {
        self.database_url.starts_with("sqlite:") && self.database_url.contains(":memory:")
    }

    /// Directory a file-backed SQLite URL points into, if any
    pub fn sqlite_data_dir(&self) -> Option<std::path::PathBuf> {
        if self.is_in_memory_sqlite() {
            return None;
        }
        let path = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = path.split('?').next().unwrap_or(path);
        std::path::Path::new(path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("sql_logging", &self.sql_logging)
            .finish()
    }
}

fn non_empty(env: &dyn EnvSource, key: &str, default: &str) -> Result<String, SettingsError> {
    let value = env.var(key).unwrap_or_else(|| default.to_string());
    if value.trim().is_empty() {
        return Err(SettingsError::InvalidSetting {
            setting_name: key.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

fn parse_port(raw: &str) -> Result<u16, SettingsError> {
    let port: u16 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        SettingsError::ParseError {
            setting_name: "PORT".to_string(),
            error: format!("'{}' is not a valid port: {}", raw, e),
        }
    })?;
    if port == 0 {
        return Err(SettingsError::InvalidSetting {
            setting_name: "PORT".to_string(),
            reason: "must be between 1 and 65535".to_string(),
        });
    }
    Ok(port)
}

fn parse_u32(env: &dyn EnvSource, key: &str, default: u32) -> Result<u32, SettingsError> {
    match env.var(key) {
        Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
            SettingsError::ParseError {
                setting_name: key.to_string(),
                error: format!("'{}': {}", raw, e),
            }
        }),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::ParseError {
            setting_name: key.to_string(),
            error: format!("'{}' is not a boolean", raw),
        }),
    }
}
