//! Convenience suggestions built from the user's watchlist

use crate::api::{StockApi, WatchlistEntry};
use serde::Serialize;
use tracing::warn;

/// A symbol the user may want to compare
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub symbol: String,
    pub name: String,
}

impl Suggestion {
    /// Entries without a symbol yield nothing
    pub fn from_entry(entry: &WatchlistEntry) -> Option<Self> {
        let symbol = entry.symbol.as_deref()?.trim().to_uppercase();
        if symbol.is_empty() {
            return None;
        }
        Some(Self {
            symbol,
            name: entry.display_name().unwrap_or_default().to_string(),
        })
    }
}

/// Load suggestions from `GET /watchlist/all`
///
/// Failure is not an error for the caller: manual input still works, so
/// the problem is logged and the list comes back empty.
pub async fn load_suggestions(api: &dyn StockApi) -> Vec<Suggestion> {
    match api.watchlist().await {
        Ok(entries) => entries.iter().filter_map(Suggestion::from_entry).collect(),
        Err(e) => {
            warn!("Could not load watchlist suggestions: {}", e);
            Vec::new()
        }
    }
}
