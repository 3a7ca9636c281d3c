//! Load `AppConfig` from environment variables.
//!
//! | Env var                 | Default                      |
//! |-------------------------|------------------------------|
//! | `PORT`                  | `4000`                       |
//! | `ENV`                   | `development`                |
//! | `DATABASE_URL`          | `postgres://localhost/green` |
//! | `DB_MAX_OPEN_CONNS`     | `25`                         |
//! | `DB_MAX_IDLE_TIME_SECS` | `900`                        |
//! | `DB_QUERY_TIMEOUT_SECS` | `3`                          |

use crate::config::types::{AppConfig, DbConfig, Environment};
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 4000u16)?;
        let env = parse_or(&lookup, "ENV", Environment::Development)?;
        let dsn = lookup("DATABASE_URL").unwrap_or_else(|| "postgres://localhost/green".into());
        let max_open_conns = parse_or(&lookup, "DB_MAX_OPEN_CONNS", 25u32)?;
        let max_idle_time = Duration::from_secs(parse_or(&lookup, "DB_MAX_IDLE_TIME_SECS", 900u64)?);
        let query_timeout = Duration::from_secs(parse_or(&lookup, "DB_QUERY_TIMEOUT_SECS", 3u64)?);

        Ok(AppConfig {
            port,
            env,
            version: VERSION,
            db: DbConfig {
                dsn,
                max_open_conns,
                max_idle_time,
                query_timeout,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
