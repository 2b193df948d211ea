//! Trending-topic search over a third-party search backend.
//!
//! [`TrendingSearch`] fans a topic out into several query variants and
//! aggregates whatever the backend returns into one block of text for the
//! research agent. It degrades to a canned block rather than failing.

mod aggregator;
mod executor;
mod linkup;
#[cfg(test)]
pub(crate) mod mock;

pub use aggregator::{
    ANALYSIS_BLOCK, AggregatorConfig, DEFAULT_QUERIES, FALLBACK_BLOCK, TrendingSearch,
    build_queries,
};
pub use executor::{execute_single_search, extract_answer};
pub use linkup::{DEFAULT_BASE_URL, LinkupClient, LinkupSettings};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Search failures, displayed as the message handed back to the agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Error: LINKUP_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Error: Linkup search client unavailable - {0}")]
    ClientUnavailable(String),

    #[error("Error: Invalid Linkup API key. Please check your LINKUP_API_KEY.")]
    Unauthorized,

    #[error("Error: Access forbidden. Please check your Linkup API permissions.")]
    Forbidden,

    #[error("Error: Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error("Error: Request to Linkup API timed out. Please try again.")]
    Timeout,

    #[error("Error: Failed to connect to Linkup API. Please check your internet connection.")]
    Connection,

    #[error("Error: Unexpected error occurred - {0}")]
    Unexpected(String),
}

impl SearchError {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => SearchError::Unauthorized,
            StatusCode::FORBIDDEN => SearchError::Forbidden,
            StatusCode::TOO_MANY_REQUESTS => SearchError::RateLimited,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => SearchError::Timeout,
            _ => SearchError::Unexpected(format!("HTTP {}: {}", status.as_u16(), body.trim())),
        }
    }

    /// Best-effort classification of an error that carries nothing but text.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("401") || lower.contains("unauthorized") {
            SearchError::Unauthorized
        } else if lower.contains("403") || lower.contains("forbidden") {
            SearchError::Forbidden
        } else if lower.contains("429") || lower.contains("rate limit") {
            SearchError::RateLimited
        } else if lower.contains("timeout") || lower.contains("timed out") {
            SearchError::Timeout
        } else if lower.contains("connection") {
            SearchError::Connection
        } else {
            SearchError::Unexpected(message.to_string())
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else if e.is_connect() {
            SearchError::Connection
        } else if let Some(status) = e.status() {
            SearchError::from_status(status, &e.to_string())
        } else {
            SearchError::from_message(&e.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Standard,
    Deep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputType {
    SourcedAnswer,
    SearchResults,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: String,
    pub depth: Depth,
    pub output_type: OutputType,
    pub include_images: bool,
}

impl SearchRequest {
    /// Standard-depth sourced answer without images.
    pub fn sourced_answer(query: &str) -> Self {
        Self {
            q: query.to_string(),
            depth: Depth::Standard,
            output_type: OutputType::SourcedAnswer,
            include_images: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}
