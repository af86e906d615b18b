//! Stock comparison client for the watchlist backend
//!
//! This crate turns up to three free-form inputs (tickers or company names)
//! into a side-by-side comparison:
//!
//! - Ticker detection (`AAPL`, `BRK.B`) and company-name resolution via `GET /search`
//! - Case-insensitive, order-preserving de-duplication of the resolved symbols
//! - The comparison request (`POST /chat/compare`)
//! - A typed view model rendered as a terminal table, an HTML fragment or JSON
//! - Watchlist suggestions (`GET /watchlist/all`) and an interactive compare form
//!
//! # Architecture
//!
//! The backend is reached through the [`StockApi`] trait. [`HttpStockApi`] is
//! the `reqwest` implementation; tests swap in a mock. [`Comparator`] drives
//! resolution and comparison, [`CompareView`] is what gets shown, and a
//! [`Formatter`] turns the view into text.
//!
//! # Example
//!
//! ```rust,ignore
//! use watchlist_compare::{Comparator, CompareConfig, FormatterFactory, HttpStockApi, OutputFormat};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = Arc::new(HttpStockApi::new(CompareConfig::from_env()?)?);
//!     let comparator = Comparator::new(api);
//!
//!     let view = comparator.compare(&["AAPL", "microsoft"]).await;
//!     println!("{}", FormatterFactory::create(OutputFormat::Table).format_view(&view));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod cache;
pub mod comparator;
pub mod config;
pub mod error;
pub mod formatter;
pub mod resolver;
pub mod suggestions;
pub mod view;

// Re-export main types for convenience
pub use api::{ComparisonResult, HttpStockApi, RetryPolicy, StockApi, StockSummary};
pub use cache::LookupCache;
pub use comparator::{CompareOutcome, Comparator};
pub use config::CompareConfig;
pub use error::{CompareError, Result};
pub use formatter::{Formatter, FormatterFactory, OutputFormat};
pub use resolver::{ResolvedSymbol, SymbolResolver, SymbolSet, is_ticker};
pub use suggestions::{Suggestion, load_suggestions};
pub use view::{CompareView, StockRow};

// Re-export the runtime environment from watchlist-utils
pub use watchlist_utils::Environment;
