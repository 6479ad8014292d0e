//! Boundary to the remote Firecrawl Simple API.
//!
//! Tools talk to [`FirecrawlApi`] only; the HTTP implementation lives in
//! [`FirecrawlClient`] and is handed out by [`ClientAccessor`].

mod accessor;
mod http;

use std::collections::BTreeMap;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use accessor::{ClientAccessor, ClientFactory};
pub use http::{ClientError, FirecrawlClient};

/// Output formats understood by the scrape endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrapeFormat {
    Markdown,
    RawHtml,
    Screenshot,
}

impl ScrapeFormat {
    pub const NAMES: &'static [&'static str] = &["markdown", "rawHtml", "screenshot"];
}

/// Body of `POST /scrape`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapePayload {
    pub url: String,
    pub formats: Vec<ScrapeFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
    pub timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

/// Body of `POST /map`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPayload {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub ignore_sitemap: bool,
    pub include_subdomains: bool,
    pub limit: u64,
}

/// Operations the tools need from the remote API.
///
/// Object-safe so a stub can stand in for the HTTP client.
pub trait FirecrawlApi: Send + Sync {
    /// Scrape one page. `Ok(None)` means the API answered without a result.
    fn scrape_webpage(&self, payload: ScrapePayload) -> BoxFuture<'_, anyhow::Result<Option<Value>>>;

    /// Map a site. Returns the raw response body; its shape is checked by the caller.
    fn generate_sitemap(&self, payload: MapPayload) -> BoxFuture<'_, anyhow::Result<Value>>;
}
