//! Runtime environment detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable selecting the runtime environment
pub const ENV_VAR: &str = "WATCHLIST_ENV";

/// Where the backend API lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Backend running on the developer machine
    #[default]
    Local,
    /// Backend deployed to a hosting provider
    Hosted,
}

/// Unknown environment name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown environment '{0}' (expected 'local' or 'hosted')")]
pub struct ParseEnvironmentError(pub String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "localhost" | "dev" | "development" => Ok(Self::Local),
            "hosted" | "prod" | "production" => Ok(Self::Hosted),
            other => Err(ParseEnvironmentError(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Hosted => f.write_str("hosted"),
        }
    }
}

impl Environment {
    /// Detect the environment from `WATCHLIST_ENV`, defaulting to [`Environment::Local`]
    pub fn from_env() -> Result<Self, ParseEnvironmentError> {
        match std::env::var(ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }
}
