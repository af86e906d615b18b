//! HTTP client for the watchlist backend

use super::{
    ComparisonResult, CompareRequest, RetryPolicy, SearchResponse, SearchResult, StockApi,
    WatchlistEntry, WatchlistResponse,
};
use crate::config::CompareConfig;
use crate::error::{CompareError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// [`StockApi`] over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpStockApi {
    client: Client,
    config: CompareConfig,
    retry: RetryPolicy,
}

impl HttpStockApi {
    /// Create a client for the configured backend
    pub fn new(config: CompareConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            retry: config.retry.clone(),
            config,
        })
    }

    /// Backend base URL
    pub fn api_base(&self) -> &Url {
        &self.config.api_base
    }

    /// Fail on non-2xx responses
    fn check_status(response: Response, endpoint: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CompareError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            })
        }
    }

    /// GET a JSON document, retrying transient failures
    async fn get_json<T: DeserializeOwned>(&self, url: Url, endpoint: &str) -> Result<T> {
        self.retry
            .execute(endpoint, || {
                let url = url.clone();
                async move {
                    debug!("GET {}", url);
                    let response = self.client.get(url).send().await?;
                    let response = Self::check_status(response, endpoint)?;
                    Ok(response.json::<T>().await?)
                }
            })
            .await
    }
}

#[async_trait]
impl StockApi for HttpStockApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut url = self.config.endpoint("search");
        url.query_pairs_mut().append_pair("q", query);

        let response: SearchResponse = self.get_json(url, "/search").await?;
        debug!("Search for {:?} returned {} results", query, response.results.len());
        Ok(response.results)
    }

    async fn compare(&self, symbols: &[String]) -> Result<ComparisonResult> {
        let url = self.config.endpoint("chat/compare");
        debug!("POST {} symbols={:?}", url, symbols);

        let response = self
            .client
            .post(url)
            .json(&CompareRequest { symbols })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        // Error statuses still carry a payload the panel can show when it decodes.
        match serde_json::from_slice::<ComparisonResult>(&body) {
            Ok(result) => {
                if !status.is_success() {
                    debug!("/chat/compare answered {} with a decodable body", status);
                }
                Ok(result)
            }
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(CompareError::HttpStatus {
                endpoint: "/chat/compare".to_string(),
                status: status.as_u16(),
            }),
        }
    }

    async fn watchlist(&self) -> Result<Vec<WatchlistEntry>> {
        let url = self.config.endpoint("watchlist/all");
        let response: WatchlistResponse = self.get_json(url, "/watchlist/all").await?;
        debug!(
            "Watchlist returned {} entries (total={:?})",
            response.watchlist.len(),
            response.total
        );
        Ok(response.watchlist)
    }
}
