//! Process-wide configuration, built once at startup and never mutated.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err("expected development|staging|production".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    pub dsn: String,
    pub max_open_conns: u32,
    pub max_idle_time: Duration,
    /// Bound applied to each store round trip.
    pub query_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub env: Environment,
    pub version: &'static str,
    pub db: DbConfig,
}
