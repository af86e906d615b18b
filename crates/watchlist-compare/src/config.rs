//! Configuration for the backend client

use crate::api::RetryPolicy;
use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use watchlist_utils::Environment;

/// Environment variable overriding the backend base URL
pub const API_BASE_ENV: &str = "WATCHLIST_API_BASE";

/// Backend address used when running against a local server
pub const LOCAL_API_BASE: &str = "http://127.0.0.1:8000";

/// Configuration for the watchlist backend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Runtime environment the base URL was chosen for
    pub environment: Environment,

    /// Backend base URL
    pub api_base: Url,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Retry policy for idempotent reads
    pub retry: RetryPolicy,

    /// Lifetime of cached name lookups; zero disables the cache
    pub lookup_cache_ttl: Duration,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            api_base: local_api_base(),
            request_timeout: Duration::from_secs(20),
            retry: RetryPolicy::default(),
            lookup_cache_ttl: Duration::from_secs(600), // 10 minutes
        }
    }
}

fn local_api_base() -> Url {
    Url::parse(LOCAL_API_BASE).expect("LOCAL_API_BASE is a valid URL")
}

impl CompareConfig {
    /// Create a new configuration builder
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder::default()
    }

    /// Build the configuration from `WATCHLIST_ENV` and `WATCHLIST_API_BASE`
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.api_base.scheme(), "http" | "https") {
            return Err(CompareError::Config(format!(
                "API base must be http or https, got '{}'",
                self.api_base.scheme()
            )));
        }

        if self.api_base.cannot_be_a_base() {
            return Err(CompareError::Config(format!(
                "API base '{}' cannot carry a path",
                self.api_base
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(CompareError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(CompareError::Config(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether name lookups should be cached
    pub fn lookup_cache_enabled(&self) -> bool {
        !self.lookup_cache_ttl.is_zero()
    }

    /// Absolute URL of a backend endpoint such as `"chat/compare"`
    ///
    /// Path segments are appended to the base, so a base of
    /// `https://host/api` yields `https://host/api/chat/compare`.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}

/// Builder for CompareConfig
#[derive(Debug, Default)]
pub struct CompareConfigBuilder {
    environment: Option<Environment>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
    lookup_cache_ttl: Option<Duration>,
}

impl CompareConfigBuilder {
    /// Set the runtime environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set the backend base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Set the lookup cache lifetime
    pub fn lookup_cache_ttl(mut self, duration: Duration) -> Self {
        self.lookup_cache_ttl = Some(duration);
        self
    }

    /// Load environment and base URL from `WATCHLIST_ENV` / `WATCHLIST_API_BASE`
    ///
    /// Values already set on the builder win over the environment.
    pub fn with_env(mut self) -> Result<Self> {
        if self.environment.is_none() {
            self.environment = Some(Environment::from_env()?);
        }
        if self.api_base.is_none() {
            if let Ok(base) = std::env::var(API_BASE_ENV) {
                if !base.trim().is_empty() {
                    self.api_base = Some(base);
                }
            }
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<CompareConfig> {
        let defaults = CompareConfig::default();
        let environment = self.environment.unwrap_or(defaults.environment);

        let api_base = match (self.api_base, environment) {
            (Some(base), _) => Url::parse(base.trim())?,
            (None, Environment::Local) => defaults.api_base,
            (None, Environment::Hosted) => {
                return Err(CompareError::Config(format!(
                    "{API_BASE_ENV} must be set when running against a hosted backend"
                )));
            }
        };

        let config = CompareConfig {
            environment,
            api_base,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            retry: self.retry.unwrap_or(defaults.retry),
            lookup_cache_ttl: self.lookup_cache_ttl.unwrap_or(defaults.lookup_cache_ttl),
        };

        config.validate()?;
        Ok(config)
    }
}
