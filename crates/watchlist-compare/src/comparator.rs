//! Resolve-then-compare flow for up to three stocks

use crate::api::{ComparisonResult, StockApi};
use crate::cache::LookupCache;
use crate::error::{CompareError, Result};
use crate::resolver::{
    MAX_COMPARE_SYMBOLS, MIN_COMPARE_SYMBOLS, ResolvedSymbol, SymbolResolver, SymbolSet,
    gather_inputs,
};
use crate::view::CompareView;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A completed comparison
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    /// Symbols sent to the backend, with their resolution hints
    pub symbols: SymbolSet,
    /// Backend payload, always with `success = true`
    pub result: ComparisonResult,
}

/// Resolves user inputs and asks the backend to compare them
#[derive(Clone)]
pub struct Comparator {
    api: Arc<dyn StockApi>,
    resolver: SymbolResolver,
}

impl Comparator {
    pub fn new(api: Arc<dyn StockApi>) -> Self {
        Self {
            resolver: SymbolResolver::new(Arc::clone(&api)),
            api,
        }
    }

    /// Cache company-name lookups across comparisons
    pub fn with_cache(mut self, cache: LookupCache) -> Self {
        self.resolver = self.resolver.with_cache(cache);
        self
    }

    /// Resolve inputs concurrently, dropping the ones that fail
    ///
    /// Order of the returned symbols follows the order of `inputs`.
    pub async fn resolve_all(&self, inputs: &[String]) -> Vec<ResolvedSymbol> {
        let lookups = inputs.iter().map(|input| self.resolver.resolve(input));
        let results = futures::future::join_all(lookups).await;

        inputs
            .iter()
            .zip(results)
            .filter_map(|(input, result)| match result {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!("Dropping compare input {:?}: {}", input, e);
                    None
                }
            })
            .collect()
    }

    /// Run the whole flow and return the backend payload
    ///
    /// Fails without touching the network when fewer than two inputs are
    /// given, and without calling the comparison endpoint when fewer than two
    /// distinct symbols resolve.
    pub async fn run<S: AsRef<str>>(&self, raw: &[S]) -> Result<CompareOutcome> {
        let inputs = gather_inputs(raw);
        if inputs.len() < MIN_COMPARE_SYMBOLS {
            return Err(CompareError::EmptyInput);
        }

        let inputs = &inputs[..inputs.len().min(MAX_COMPARE_SYMBOLS)];
        info!("Resolving symbols for {:?}", inputs);

        let resolved = self.resolve_all(inputs).await;
        let symbols = SymbolSet::from_resolved(&resolved);

        if symbols.len() < MIN_COMPARE_SYMBOLS {
            warn!("Only {} distinct symbols resolved", symbols.len());
            return Err(CompareError::InsufficientResolved);
        }

        for mapping in &symbols.mappings {
            debug!("Resolved: {}", mapping);
        }
        info!("Comparing {}", symbols.symbols.join(" vs "));

        let result = self.api.compare(&symbols.symbols).await?;
        if !result.success {
            return Err(CompareError::Backend(result.error));
        }

        Ok(CompareOutcome { symbols, result })
    }

    /// Run the flow and turn every outcome into something displayable
    pub async fn compare<S: AsRef<str>>(&self, raw: &[S]) -> CompareView {
        match self.run(raw).await {
            Ok(outcome) => CompareView::from_outcome(&outcome),
            Err(e) => {
                match &e {
                    CompareError::Network(_)
                    | CompareError::HttpStatus { .. }
                    | CompareError::Json(_) => {
                        warn!("Compare request failed: {}", e);
                    }
                    _ => debug!("Compare not performed: {}", e),
                }
                CompareView::from_error(&e)
            }
        }
    }
}
