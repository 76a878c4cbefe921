use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Quote;

/// Classified failure of a quote fetch
///
/// Stored verbatim as the payload of a failed load, so it must stay cheap to
/// clone and comparable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteSourceError {
    #[error("API key not configured")]
    ConfigurationMissing,
    #[error("API key rejected by the quote provider")]
    Unauthorized,
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("No quotes received from the quote provider")]
    EmptyResult,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Quote provider error: {0}")]
    Unknown(String),
}

impl QuoteSourceError {
    /// Short stable identifier, suitable for logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteSourceError::ConfigurationMissing => "configuration_missing",
            QuoteSourceError::Unauthorized => "unauthorized",
            QuoteSourceError::RateLimited => "rate_limited",
            QuoteSourceError::EmptyResult => "empty_result",
            QuoteSourceError::NetworkError(_) => "network_error",
            QuoteSourceError::Unknown(_) => "unknown",
        }
    }
}

/// What a single fetch asks the provider for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    /// A batch without category restriction
    Unscoped,
    /// A batch restricted to one category
    Category(String),
    /// Exactly one quote from a randomly chosen category
    Random,
}

impl FetchScope {
    /// Empty category collapses to `Unscoped`
    pub fn category(category: impl Into<String>) -> Self {
        let category = category.into();
        if category.is_empty() {
            FetchScope::Unscoped
        } else {
            FetchScope::Category(category)
        }
    }
}

/// Remote quote provider port
///
/// Implementations are stateless between calls. A successful response with no
/// records is reported as [`QuoteSourceError::EmptyResult`].
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(&self, scope: &FetchScope) -> Result<Vec<Quote>, QuoteSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_category_is_unscoped() {
        assert_eq!(FetchScope::category(""), FetchScope::Unscoped);
        assert_eq!(
            FetchScope::category("wisdom"),
            FetchScope::Category("wisdom".to_string())
        );
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        let all = [
            QuoteSourceError::ConfigurationMissing,
            QuoteSourceError::Unauthorized,
            QuoteSourceError::RateLimited,
            QuoteSourceError::EmptyResult,
            QuoteSourceError::NetworkError("timeout".into()),
            QuoteSourceError::Unknown("teapot".into()),
        ];
        let mut kinds: Vec<&str> = all.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), all.len());
        assert_eq!(
            QuoteSourceError::Unknown("HTTP 418".into()).to_string(),
            "Quote provider error: HTTP 418"
        );
    }
}
