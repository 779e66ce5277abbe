//! HTTP client for the Lidarr artist API.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::TransportError;
use super::models::{CatalogCandidate, ProvisionRequest, TrackedEntry};
use crate::config::Configuration;

const API_KEY_HEADER: &str = "X-Api-Key";

/// The three remote operations the reconciliation pipeline depends on.
///
/// Implementations never retry.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Searches the catalog by free-text name. An empty result means no match.
    async fn lookup(&self, term: &str) -> Result<Vec<CatalogCandidate>, TransportError>;

    /// Lists every artist currently tracked by the service.
    async fn list_tracked(&self) -> Result<Vec<TrackedEntry>, TransportError>;

    /// Registers a new artist for tracking.
    async fn create(&self, request: &ProvisionRequest) -> Result<(), TransportError>;
}

/// Per-operation request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub lookup: Duration,
    pub list_tracked: Duration,
    pub create: Duration,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self {
            lookup: Duration::from_secs(30),
            list_tracked: Duration::from_secs(15),
            create: Duration::from_secs(30),
        }
    }
}

/// `CatalogClient` backed by a Lidarr instance.
#[derive(Clone)]
pub struct LidarrClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeouts: ClientTimeouts,
}

impl LidarrClient {
    /// Create a new client for the service described by `config`.
    ///
    /// # Arguments
    /// * `config` - Connection settings, base URL and API key are used
    /// * `timeouts` - Per-operation request timeouts
    pub fn new(config: &Configuration, timeouts: ClientTimeouts) -> Result<Self> {
        let client = Client::builder().build()?;

        // Ensure base_url doesn't have trailing slash
        let base_url = config.catalog_base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            timeouts,
        })
    }

    /// Get the base URL of the Lidarr service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeouts(&self) -> ClientTimeouts {
        self.timeouts
    }

    fn lookup_url(&self, term: &str) -> String {
        format!(
            "{}/api/v1/artist/lookup?term={}",
            self.base_url,
            urlencoding::encode(term)
        )
    }

    fn artist_url(&self) -> String {
        format!("{}/api/v1/artist", self.base_url)
    }

    /// Sends `request`, maps failures, and returns the raw body of a
    /// successful response.
    async fn send(
        &self,
        operation: &str,
        timeout: Duration,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, TransportError> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(operation, timeout, e))?;

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            // Keep the status when the error body cannot be read.
            Err(e) if !status.is_success() => {
                debug!("Could not read {} error body: {}", operation, e);
                return Err(TransportError::status(status.as_u16(), b""));
            }
            Err(e) => return Err(TransportError::from_reqwest(operation, timeout, e)),
        };

        if !status.is_success() {
            return Err(TransportError::status(status.as_u16(), &body));
        }

        Ok(body.to_vec())
    }

    fn parse<T: DeserializeOwned>(operation: &str, body: &[u8]) -> Result<T, TransportError> {
        serde_json::from_slice(body).map_err(|e| {
            TransportError::malformed(format!("{} response is not the expected shape: {}", operation, e))
        })
    }

    /// Decodes a lookup result array. Only the first candidate has to be
    /// well formed; later entries that do not decode are skipped.
    fn parse_candidates(body: &[u8]) -> Result<Vec<CatalogCandidate>, TransportError> {
        let values: Vec<serde_json::Value> = Self::parse("lookup", body)?;
        let mut candidates = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<CatalogCandidate>(value) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) if index == 0 => {
                    return Err(TransportError::malformed(format!(
                        "lookup response is not the expected shape: {}",
                        e
                    )))
                }
                Err(e) => debug!("Skipping lookup result {}: {}", index, e),
            }
        }
        Ok(candidates)
    }
}

#[async_trait]
impl CatalogClient for LidarrClient {
    async fn lookup(&self, term: &str) -> Result<Vec<CatalogCandidate>, TransportError> {
        let url = self.lookup_url(term);
        debug!("GET {}", url);
        let body = self
            .send("lookup", self.timeouts.lookup, self.client.get(&url))
            .await?;
        Self::parse_candidates(&body)
    }

    async fn list_tracked(&self) -> Result<Vec<TrackedEntry>, TransportError> {
        let url = self.artist_url();
        debug!("GET {}", url);
        let body = self
            .send(
                "list tracked",
                self.timeouts.list_tracked,
                self.client.get(&url),
            )
            .await?;
        Self::parse("list tracked", &body)
    }

    async fn create(&self, request: &ProvisionRequest) -> Result<(), TransportError> {
        let url = self.artist_url();
        debug!("POST {} ({})", url, request.artist_name);
        // .json() sets Content-Type: application/json
        self.send(
            "create",
            self.timeouts.create,
            self.client.post(&url).json(request),
        )
        .await?;
        Ok(())
    }
}
