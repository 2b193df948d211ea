use super::{SearchBackend, SearchError, SearchRequest, SearchResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.linkup.so/v1";

#[derive(Debug, Clone)]
pub struct LinkupSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Transport-level timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for LinkupSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Linkup search API.
pub struct LinkupClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LinkupClient {
    pub fn new(settings: &LinkupSettings) -> Result<Self, SearchError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SearchError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| SearchError::ClientUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchBackend for LinkupClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search", self.base_url);
        debug!(query = %request.q, %url, "linkup request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::from_status(status, &body));
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}
