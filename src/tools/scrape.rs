//! `firecrawl_scrape`: fetch one page in the requested formats.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{ToolDefinition, ToolResponse};
use crate::client::{ClientAccessor, ScrapeFormat, ScrapePayload};
use crate::error::ToolError;
use crate::schema::{Field, Schema};

pub const SCRAPE_TOOL: &str = "firecrawl_scrape";

const DESCRIPTION: &str = "Scrape content from a URL with JavaScript rendering support";

/// Validated input of `firecrawl_scrape`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeParams {
    pub url: String,
    pub formats: Vec<ScrapeFormat>,
    #[serde(default)]
    pub include_tags: Option<Vec<String>>,
    #[serde(default)]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub wait_for: Option<u64>,
    pub timeout: u64,
}

impl From<ScrapeParams> for ScrapePayload {
    fn from(params: ScrapeParams) -> Self {
        Self {
            url: params.url,
            formats: params.formats,
            wait_for: params.wait_for,
            timeout: params.timeout,
            include_tags: params.include_tags,
            exclude_tags: params.exclude_tags,
            headers: params.headers,
        }
    }
}

/// Parameter schema; `timeout` defaults to `default_timeout_ms`.
pub fn scrape_schema(default_timeout_ms: u64) -> Schema {
    Schema::new()
        .field(Field::url("url", "The URL to scrape (required)").required())
        .field(
            Field::enum_list("formats", ScrapeFormat::NAMES, "Formats to include in the output")
                .non_empty()
                .with_default(json!(["markdown"])),
        )
        .field(Field::string_list(
            "includeTags",
            "HTML tags to include in the scraped result",
        ))
        .field(Field::string_list(
            "excludeTags",
            "HTML tags to exclude from the scraped result",
        ))
        .field(Field::string_map(
            "headers",
            "Custom HTTP headers to send with the request",
        ))
        .field(Field::integer(
            "waitFor",
            0,
            "Milliseconds to wait for JavaScript execution before scraping",
        ))
        .field(
            Field::integer("timeout", 1, "Request timeout in milliseconds")
                .with_default(json!(default_timeout_ms)),
        )
}

pub fn scrape_tool(clients: Arc<ClientAccessor>, default_timeout_ms: u64) -> ToolDefinition {
    ToolDefinition::wrap(
        SCRAPE_TOOL,
        DESCRIPTION,
        scrape_schema(default_timeout_ms),
        move |params: ScrapeParams| {
            let clients = clients.clone();
            async move { execute(&clients, params).await }
        },
    )
}

async fn execute(clients: &ClientAccessor, params: ScrapeParams) -> anyhow::Result<ToolResponse> {
    let client = clients.get()?;
    let result = client.scrape_webpage(params.into()).await?;

    match result {
        Some(data) if !is_falsy(&data) => ToolResponse::json(&data),
        _ => Err(ToolError::Validation(
            "Failed to scrape webpage: No result returned".to_string(),
        )
        .into()),
    }
}

/// `null`, `false`, `0` and `""` count as no result.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
