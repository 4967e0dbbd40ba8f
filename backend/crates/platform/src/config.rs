//! Database Connection Configuration
//!
//! Connection settings are injected through the environment, never compiled in.
//! `DATABASE_URL` wins when present; otherwise the discrete `DB_*` variables
//! are combined.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

const DEFAULT_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where the database lives
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
pub enum DatabaseSource {
    Url(String),
    Parts {
        host: String,
        port: u16,
        name: String,
        user: String,
        password: String,
    },
}

/// Database pool configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    pub source: DatabaseSource,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = match get("DATABASE_URL") {
            Some(url) => DatabaseSource::Url(url),
            None => DatabaseSource::Parts {
                host: get("DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?,
                port: parse_or("DB_PORT", get("DB_PORT"), DEFAULT_PORT)?,
                name: get("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
                user: get("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
                // An empty password is legitimate for local development
                password: lookup("DB_PASSWORD").unwrap_or_default(),
            },
        };

        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            get("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;

        Ok(Self {
            source,
            max_connections,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        })
    }

    /// Build sqlx connect options
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.source {
            DatabaseSource::Url(url) => {
                PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid {
                    name: "DATABASE_URL",
                    value: "[REDACTED]".to_string(),
                })
            }
            DatabaseSource::Parts {
                host,
                port,
                name,
                user,
                password,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .database(name)
                .username(user)
                .password(password)),
        }
    }

    /// Pool options (connections are acquired per request and returned on drop)
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("DatabaseConfig");
        match &self.source {
            DatabaseSource::Url(_) => {
                builder.field("url", &"[REDACTED]");
            }
            DatabaseSource::Parts {
                host,
                port,
                name,
                user,
                ..
            } => {
                builder
                    .field("host", host)
                    .field("port", port)
                    .field("name", name)
                    .field("user", user)
                    .field("password", &"[REDACTED]");
            }
        }
        builder
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parts_from_lookup() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_NAME", "plantilla"),
            ("DB_USER", "esw"),
            ("DB_PASSWORD", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(
            config.source,
            DatabaseSource::Parts {
                host: "db.internal".to_string(),
                port: 5432,
                name: "plantilla".to_string(),
                user: "esw".to_string(),
                password: "s3cret".to_string(),
            }
        );
        assert_eq!(config.max_connections, 5);
        assert!(config.connect_options().is_ok());
    }

    #[test]
    fn test_url_overrides_parts() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://esw:pw@localhost/plantilla"),
            ("DB_HOST", "ignored"),
            ("DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert!(matches!(config.source, DatabaseSource::Url(_)));
        assert_eq!(config.max_connections, 12);
        assert!(config.connect_options().is_ok());
    }

    #[test]
    fn test_missing_required() {
        let result = DatabaseConfig::from_lookup(lookup_from(&[("DB_HOST", "localhost")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("DB_NAME"));
    }

    #[test]
    fn test_invalid_port() {
        let result = DatabaseConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "not-a-port"),
            ("DB_NAME", "plantilla"),
            ("DB_USER", "root"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "DB_PORT", .. })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "localhost"),
            ("DB_NAME", "plantilla"),
            ("DB_USER", "root"),
            ("DB_PASSWORD", "topsecret"),
        ]))
        .unwrap();

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("topsecret"));
        assert!(debug_output.contains("REDACTED"));
    }
}
