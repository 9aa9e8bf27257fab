use std::time::Duration;

use crate::{Error, Result};

/// All configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub db: DbSettings,

    // HTTP
    pub port: u16,

    // Seeding
    pub seed_days: u32,
}

/// Connection pool policy.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    /// `None` keeps idle connections open indefinitely (needed for `sqlite::memory:`).
    pub idle_timeout: Option<Duration>,
    pub acquire_timeout: Duration,
}

impl DbSettings {
    /// Single-connection in-memory database, for tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            idle_timeout: None,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "Required environment variable 'DATABASE_URL' is not set. Check your .env file."
                        .to_string(),
                )
            })?;

        Ok(Config {
            db: DbSettings {
                url,
                max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 20)?,
                idle_timeout: Some(Duration::from_secs(parsed(&lookup, "DB_IDLE_TIMEOUT_SECS", 30)?)),
                acquire_timeout: Duration::from_secs(parsed(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 2)?),
            },
            port: parsed(&lookup, "PORT", 3000)?,
            seed_days: parsed(&lookup, "SEED_DAYS", 20)?,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{key} must be a number, got: '{raw}'"))),
    }
}
