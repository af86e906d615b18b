//! Shared utilities for watchlist-rs
//!
//! This crate provides common functionality used across the watchlist-rs workspace:
//! tracing setup and detection of the runtime environment the client talks to.

pub mod config;
pub mod logging;

pub use config::{Environment, ParseEnvironmentError};
pub use logging::{LogFormat, init_tracing, init_tracing_with_default};
