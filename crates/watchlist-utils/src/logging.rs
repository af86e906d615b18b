//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "warn,watchlist_compare=info";

/// Environment variable selecting the log line format
pub const LOG_FORMAT_VAR: &str = "WATCHLIST_LOG_FORMAT";

/// Shape of emitted log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Read `WATCHLIST_LOG_FORMAT`; anything other than `json` means text
    pub fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_VAR) {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Initialize tracing subscriber with the default filter
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_FILTER);
}

/// Initialize tracing subscriber, falling back to `default_filter` when `RUST_LOG` is unset
///
/// Log lines go to stderr so rendered output on stdout stays clean.
pub fn init_tracing_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    let _ = match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
}
