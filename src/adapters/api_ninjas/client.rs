//! API Ninjas Quotes Client
//!
//! HTTP client for the API Ninjas `/v1/quotes` endpoint.
//! Classifies every failure into the quote source taxonomy; never retries.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{Client, StatusCode};

use crate::domain::{Quote, CATEGORIES};
use crate::ports::quote_source::{FetchScope, QuoteSource, QuoteSourceError};

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.api-ninjas.com/v1";

/// Placeholder shipped in sample configs, treated as no key at all
pub const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

/// Header carrying the credential
const API_KEY_HEADER: &str = "X-Api-Key";

/// API Ninjas client configuration
#[derive(Debug, Clone)]
pub struct ApiNinjasConfig {
    /// Base URL, `/quotes` is appended
    pub api_base_url: String,
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ApiNinjasConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// API Ninjas quotes client
#[derive(Debug, Clone)]
pub struct ApiNinjasClient {
    config: ApiNinjasConfig,
    http: Client,
}

impl ApiNinjasClient {
    /// Create a new client with default configuration (no key)
    pub fn new() -> Result<Self, QuoteSourceError> {
        Self::with_config(ApiNinjasConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ApiNinjasConfig) -> Result<Self, QuoteSourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuoteSourceError::Unknown(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Create a new client with API key
    pub fn with_api_key(api_key: String) -> Result<Self, QuoteSourceError> {
        let mut config = ApiNinjasConfig::default();
        config.api_key = Some(api_key);
        Self::with_config(config)
    }

    /// Usable credential, or `ConfigurationMissing` for absent/blank/placeholder keys
    fn credential(&self) -> Result<&str, QuoteSourceError> {
        match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
            _ => Err(QuoteSourceError::ConfigurationMissing),
        }
    }

    /// Fetch one batch, optionally restricted to a category
    pub async fn get_quotes(&self, category: Option<&str>) -> Result<Vec<Quote>, QuoteSourceError> {
        let api_key = self.credential()?;
        let url = format!("{}/quotes", self.config.api_base_url.trim_end_matches('/'));

        let mut req = self.http.get(&url).header(API_KEY_HEADER, api_key);
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            req = req.query(&[("category", category)]);
        }

        tracing::debug!("GET {} (category: {})", url, category.unwrap_or("-"));

        let response = req.send().await.map_err(classify_transport_error)?;
        self.handle_response(response).await
    }

    /// Handle API response and deserialize
    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<Quote>, QuoteSourceError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &error_text));
        }

        let body = response.text().await.map_err(classify_transport_error)?;
        parse_quotes(&body)
    }

    /// Get the configured API base URL
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }
}

/// Map a non-success HTTP status to the taxonomy
pub(crate) fn classify_status(status: StatusCode, body: &str) -> QuoteSourceError {
    if status == StatusCode::UNAUTHORIZED {
        return QuoteSourceError::Unauthorized;
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return QuoteSourceError::RateLimited;
    }

    let body = body.trim();
    if body.is_empty() {
        QuoteSourceError::Unknown(format!("API error {}", status))
    } else {
        QuoteSourceError::Unknown(format!("API error {}: {}", status, body))
    }
}

fn classify_transport_error(e: reqwest::Error) -> QuoteSourceError {
    if e.is_timeout() || e.is_connect() || e.is_request() {
        QuoteSourceError::NetworkError(e.to_string())
    } else {
        QuoteSourceError::Unknown(e.to_string())
    }
}

/// Decode a success payload; an empty array is `EmptyResult`
pub(crate) fn parse_quotes(body: &str) -> Result<Vec<Quote>, QuoteSourceError> {
    let quotes: Vec<Quote> = serde_json::from_str(body)
        .map_err(|e| QuoteSourceError::Unknown(format!("Failed to parse response: {}", e)))?;

    if quotes.is_empty() {
        return Err(QuoteSourceError::EmptyResult);
    }
    Ok(quotes)
}

#[async_trait]
impl QuoteSource for ApiNinjasClient {
    async fn fetch_quotes(&self, scope: &FetchScope) -> Result<Vec<Quote>, QuoteSourceError> {
        match scope {
            FetchScope::Unscoped => self.get_quotes(None).await,
            FetchScope::Category(category) => self.get_quotes(Some(category)).await,
            FetchScope::Random => {
                // Credential check first so a missing key never depends on rng
                self.credential()?;
                let category = CATEGORIES
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(CATEGORIES[0]);
                let mut quotes = self.get_quotes(Some(category)).await?;
                quotes.truncate(1);
                Ok(quotes)
            }
        }
    }
}
