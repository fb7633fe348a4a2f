//! HTTP client for the catalog and stock services.

use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use rocketshoes_commerce::{catalog::Product, catalog::StockRecord, ProductId};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::dependency::DependencyTag;
use crate::retry::RetryPolicy;
use crate::source::{ProductCatalog, StockLookup};
use crate::timeout::TimeoutConfig;

/// Base URL of the storefront fake API during development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Error type for fetch operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: StatusCode, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Create from a dependency tag's defaults.
    pub fn from_tag(tag: DependencyTag) -> Self {
        Self {
            timeout: TimeoutConfig::from_total(tag.default_timeout()),
            retry: RetryPolicy::new(tag.default_max_retries()),
        }
    }
}

/// Serializable API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/products/{id}` and `/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total timeout override for every request, in milliseconds. Must be
    /// greater than zero.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "positive_timeout"
    )]
    pub timeout_ms: Option<u64>,

    /// Retries after a timeout, connection error or 5xx.
    #[serde(default)]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn positive_timeout<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<u64>::deserialize(deserializer)? {
        Some(0) => Err(serde::de::Error::custom("timeout_ms must be greater than zero")),
        timeout => Ok(timeout),
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            max_retries: 0,
        }
    }
}

impl ApiConfig {
    /// Policy for a dependency, with this config's overrides applied.
    ///
    /// A zero `timeout_ms` is ignored in favor of the dependency default.
    pub fn policy_for(&self, tag: DependencyTag) -> FetchPolicy {
        let total = self
            .timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or_else(|| tag.default_timeout());
        FetchPolicy::new(TimeoutConfig::from_total(total), RetryPolicy::new(self.max_retries))
    }
}

/// Stock payload as served by the API. Only `amount` is required.
#[derive(Debug, Deserialize)]
struct StockPayload {
    amount: i64,
}

/// HTTP client for the storefront API.
///
/// Implements [`ProductCatalog`] and [`StockLookup`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    catalog_policy: FetchPolicy,
    stock_policy: FetchPolicy,
}

impl ApiClient {
    /// Create a client with each dependency's default policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_policies(
            base_url,
            FetchPolicy::from_tag(DependencyTag::Catalog),
            FetchPolicy::from_tag(DependencyTag::Stock),
        )
    }

    /// Create a client from serialized settings.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::with_policies(
            config.base_url.clone(),
            config.policy_for(DependencyTag::Catalog),
            config.policy_for(DependencyTag::Stock),
        )
    }

    /// Create a client with explicit policies.
    pub fn with_policies(
        base_url: impl Into<String>,
        catalog_policy: FetchPolicy,
        stock_policy: FetchPolicy,
    ) -> Result<Self, FetchError> {
        let connect = catalog_policy
            .timeout
            .connect
            .min(stock_policy.timeout.connect);
        let http = reqwest::Client::builder()
            .connect_timeout(connect)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            catalog_policy,
            stock_policy,
        })
    }

    /// The base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a product's catalog record.
    pub fn product_url(&self, id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    /// URL of a product's stock record.
    pub fn stock_url(&self, id: ProductId) -> String {
        format!("{}/stock/{}", self.base_url, id)
    }

    /// Fetch JSON with the given policy, retrying as it allows.
    pub async fn fetch_with_policy<T: DeserializeOwned>(
        &self,
        url: &str,
        tag: DependencyTag,
        policy: &FetchPolicy,
    ) -> Result<T, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url, policy.timeout.total).await {
                Ok(value) => return Ok(value),
                Err(err) if policy.retry.should_retry(&err, attempt) => {
                    let delay = policy.retry.backoff.delay_for_attempt(attempt);
                    tracing::debug!(
                        dependency = %tag,
                        url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying fetch"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!(dependency = %tag, url, attempt, error = %err, "fetch failed");
                    return Err(err);
                }
            }
        }
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let resp = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        // Check for HTTP errors
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(FetchError::from_reqwest)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}

#[async_trait]
impl ProductCatalog for ApiClient {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        let url = self.product_url(id);
        let product: Product = self
            .fetch_with_policy(&url, DependencyTag::Catalog, &self.catalog_policy)
            .await?;

        if product.id != id {
            return Err(FetchError::Deserialization(format!(
                "catalog returned product {} for {}",
                product.id, id
            )));
        }
        Ok(product)
    }
}

#[async_trait]
impl StockLookup for ApiClient {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        let url = self.stock_url(id);
        let payload: StockPayload = self
            .fetch_with_policy(&url, DependencyTag::Stock, &self.stock_policy)
            .await?;
        Ok(StockRecord::new(id, payload.amount))
    }
}
