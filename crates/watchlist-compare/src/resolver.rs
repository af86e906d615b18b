//! Ticker detection, name resolution and symbol de-duplication

use crate::api::StockApi;
use crate::cache::LookupCache;
use crate::error::{CompareError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// Fewest distinct symbols a comparison needs
pub const MIN_COMPARE_SYMBOLS: usize = 2;
/// Most symbols a comparison accepts
pub const MAX_COMPARE_SYMBOLS: usize = 3;

static TICKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,5}(?:[.-][A-Z]{1,2})?$").expect("ticker pattern is valid")
});

/// Whether `input` already looks like a ticker (`AAPL`, `BRK.B`, `BF-B`)
///
/// The check runs on the trimmed, upper-cased text, so `"aapl"` passes.
pub fn is_ticker(input: &str) -> bool {
    TICKER_RE.is_match(&input.trim().to_uppercase())
}

/// Trim raw inputs, drop empty ones and exact repeats, keep first-seen order
pub fn gather_inputs<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

/// An input mapped to its canonical ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSymbol {
    /// Text as the user typed it (trimmed)
    pub input: String,
    /// Canonical upper-case ticker
    pub symbol: String,
    /// `true` when the input was a company name resolved by lookup
    pub resolved: bool,
    /// Company name reported by the lookup
    pub name: Option<String>,
}

impl ResolvedSymbol {
    /// An input that was already a ticker
    pub fn ticker(input: &str) -> Self {
        let input = input.trim();
        Self {
            input: input.to_string(),
            symbol: input.to_uppercase(),
            resolved: false,
            name: None,
        }
    }
}

/// De-duplicated symbols ready for the comparison request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    /// Upper-case symbols in first-seen order
    pub symbols: Vec<String>,
    /// `"<input> -> <SYMBOL>"` hints for inputs resolved by lookup
    pub mappings: Vec<String>,
}

impl SymbolSet {
    /// Upper-case and de-duplicate resolved symbols, keeping first occurrences
    pub fn from_resolved<'a>(resolved: impl IntoIterator<Item = &'a ResolvedSymbol>) -> Self {
        let mut set = Self::default();
        let mut seen = HashSet::new();

        for r in resolved {
            let symbol = r.symbol.trim().to_uppercase();
            if symbol.is_empty() || !seen.insert(symbol.clone()) {
                continue;
            }
            if r.resolved {
                set.mappings.push(format!("{} -> {}", r.input, symbol));
            }
            set.symbols.push(symbol);
        }

        set
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Resolves free-form inputs to tickers through the backend search
#[derive(Clone)]
pub struct SymbolResolver {
    api: Arc<dyn StockApi>,
    cache: Option<LookupCache>,
}

impl SymbolResolver {
    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self { api, cache: None }
    }

    /// Remember lookups in `cache`
    pub fn with_cache(mut self, cache: LookupCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Resolve one input
    ///
    /// Returns `Ok(None)` for blank input. Ticker-shaped input is returned
    /// upper-cased without a lookup; anything else takes the first search hit.
    pub async fn resolve(&self, raw: &str) -> Result<Option<ResolvedSymbol>> {
        let input = raw.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if is_ticker(input) {
            return Ok(Some(ResolvedSymbol::ticker(input)));
        }

        let results = match &self.cache {
            Some(cache) => cache.get_or_search(input, || self.api.search(input)).await?,
            None => self.api.search(input).await?,
        };

        let first = results.into_iter().next();
        let Some((symbol, name)) = first.and_then(|hit| {
            let symbol = hit.symbol.filter(|s| !s.trim().is_empty())?;
            Some((symbol, hit.name))
        }) else {
            return Err(CompareError::NoMatch {
                input: input.to_string(),
            });
        };

        let symbol = symbol.trim().to_uppercase();
        debug!("Resolved {:?} to {}", input, symbol);

        Ok(Some(ResolvedSymbol {
            input: input.to_string(),
            name: Some(name.filter(|n| !n.is_empty()).unwrap_or_else(|| symbol.clone())),
            symbol,
            resolved: true,
        }))
    }
}
