use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use super::{FirecrawlApi, MapPayload, ScrapePayload};

/// Transport and protocol failures talking to the Firecrawl API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx response
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// 2xx response carrying `"success": false`
    #[error("API error: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        let detail = describe(e.without_url());
        if detail.timeout {
            ClientError::Timeout(detail.message)
        } else if detail.decode {
            ClientError::Decode(detail.message)
        } else {
            ClientError::Network(detail.message)
        }
    }
}

struct ErrorDetail {
    message: String,
    timeout: bool,
    decode: bool,
}

/// Flatten a reqwest error and its sources into one line.
///
/// The request URL is stripped first so a host name cannot leak into the
/// message and skew classification.
fn describe(error: reqwest::Error) -> ErrorDetail {
    let timeout = error.is_timeout();
    let decode = error.is_decode();

    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    ErrorDetail {
        message,
        timeout,
        decode,
    }
}

/// HTTP client for a Firecrawl Simple deployment
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirecrawlClient {
    /// Create a client for `base_url` (e.g. `http://localhost:3002/v1`).
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("firecrawl-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("POST {url}");

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn scrape(&self, payload: &ScrapePayload) -> Result<Option<Value>, ClientError> {
        let body = self.post("scrape", payload).await?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ClientError::Rejected(
                error_message(&body.to_string()).unwrap_or_else(|| "scrape was not successful".to_string()),
            ));
        }

        Ok(body.get("data").filter(|data| !data.is_null()).cloned())
    }

    pub async fn map(&self, payload: &MapPayload) -> Result<Value, ClientError> {
        self.post("map", payload).await
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|key| json.get(key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

impl FirecrawlApi for FirecrawlClient {
    fn scrape_webpage(&self, payload: ScrapePayload) -> BoxFuture<'_, anyhow::Result<Option<Value>>> {
        Box::pin(async move { Ok(self.scrape(&payload).await?) })
    }

    fn generate_sitemap(&self, payload: MapPayload) -> BoxFuture<'_, anyhow::Result<Value>> {
        Box::pin(async move { Ok(self.map(&payload).await?) })
    }
}
