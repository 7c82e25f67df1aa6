//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::database::{DatabaseConfig, RetryPolicy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Startup schema bootstrap settings.
#[derive(Debug, Clone)]
pub struct InitConfig {
    pub retry: RetryPolicy,
    /// Exit instead of serving when the schema could not be applied.
    pub strict: bool,
    /// Override for the embedded `init.sql`.
    pub schema_path: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub init: InitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let database = DatabaseConfig {
            host: vars.required("DB_HOST")?,
            user: vars.required("DB_USER")?,
            password: vars.required("DB_PASSWORD")?,
            name: vars.required("DB_NAME")?,
            port: vars.parsed("DB_PORT", 5432)?,
            connect_timeout: Duration::from_secs(vars.parsed("DB_CONNECT_TIMEOUT_SECS", 10)?),
        };

        let init = InitConfig {
            retry: RetryPolicy {
                max_attempts: vars.parsed("DB_INIT_ATTEMPTS", 30)?,
                backoff: Duration::from_millis(vars.parsed("DB_INIT_BACKOFF_MS", 1000)?),
            },
            strict: vars.flag("DB_INIT_STRICT"),
            schema_path: vars.get("SCHEMA_PATH").map(PathBuf::from),
        };

        Ok(Self {
            host: vars.get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: vars.parsed("PORT", 8080)?,
            database,
            init,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Optional setting; an empty value falls back to the default.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Required setting; only an unset key is missing, empty is a valid value.
    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or(ConfigError::Missing(key))
    }

    fn parsed<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            None => Ok(default),
        }
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }
}
