//! Watchlist backend API: wire types, the [`StockApi`] seam and its HTTP client

pub mod http;
pub mod retry;

pub use http::HttpStockApi;
pub use retry::RetryPolicy;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One hit from `GET /search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SearchResult {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            name: Some(name.into()),
        }
    }
}

/// Body of `GET /search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Body of `POST /chat/compare`
#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest<'a> {
    pub symbols: &'a [String],
}

/// Per-symbol summary inside a comparison payload
///
/// Numeric fields stay as raw JSON because the backend sends numbers,
/// numeric strings or `null` depending on what its quote source returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub change: Option<Value>,
    #[serde(default)]
    pub pe_ratio: Option<Value>,
    #[serde(default)]
    pub market_cap: Option<Value>,
}

/// Response of `POST /chat/compare`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stocks: Option<Vec<StockSummary>>,
    #[serde(default)]
    pub comparison: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Entry of `GET /watchlist/all`
///
/// The display name arrives under `company_name`, `company` or `name`
/// depending on which backend revision produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl WatchlistEntry {
    /// First non-empty of `company_name`, `company`, `name`
    pub fn display_name(&self) -> Option<&str> {
        [&self.company_name, &self.company, &self.name]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|name| !name.is_empty())
    }
}

/// Body of `GET /watchlist/all`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistResponse {
    #[serde(default)]
    pub watchlist: Vec<WatchlistEntry>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Operations the comparator needs from the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockApi: Send + Sync {
    /// Search symbols by free-form text (`GET /search?q=`)
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Request a comparison payload (`POST /chat/compare`)
    async fn compare(&self, symbols: &[String]) -> Result<ComparisonResult>;

    /// Fetch the user's watchlist (`GET /watchlist/all`)
    async fn watchlist(&self) -> Result<Vec<WatchlistEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_result_tolerates_missing_fields() {
        let result: ComparisonResult = serde_json::from_value(json!({
            "success": true,
            "stocks": [
                {"symbol": "AAPL", "price": 150.2, "change": 1.23},
                {"symbol": "MSFT", "price": "310.5", "pe_ratio": null}
            ]
        }))
        .unwrap();

        let stocks = result.stocks.unwrap();
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].price, Some(json!(150.2)));
        assert_eq!(stocks[1].price, Some(json!("310.5")));
        assert_eq!(stocks[1].pe_ratio, None);
        assert_eq!(stocks[1].market_cap, None);
        assert!(result.comparison.is_none());
    }

    #[test]
    fn test_failure_payload() {
        let result: ComparisonResult =
            serde_json::from_value(json!({"success": false, "error": "x"})).unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("x"));
        assert!(result.stocks.is_none());
    }

    #[test]
    fn test_search_response_without_results() {
        let response: SearchResponse =
            serde_json::from_value(json!({"query": "zzz", "error": "boom"})).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_watchlist_display_name_fallback() {
        let entry: WatchlistEntry = serde_json::from_value(json!({
            "symbol": "AAPL",
            "company_name": "",
            "company": "Apple",
            "name": "Apple Inc."
        }))
        .unwrap();
        assert_eq!(entry.display_name(), Some("Apple"));

        let entry: WatchlistEntry =
            serde_json::from_value(json!({"symbol": "MSFT", "name": "Microsoft"})).unwrap();
        assert_eq!(entry.display_name(), Some("Microsoft"));

        let entry: WatchlistEntry = serde_json::from_value(json!({"symbol": "TSLA"})).unwrap();
        assert_eq!(entry.display_name(), None);
    }

    #[test]
    fn test_compare_request_body() {
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let body = serde_json::to_value(CompareRequest { symbols: &symbols }).unwrap();
        assert_eq!(body, json!({"symbols": ["AAPL", "MSFT"]}));
    }
}
