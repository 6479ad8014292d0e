//! `firecrawl_map`: list the URLs of a site.
//!
//! The remote result must look like `{ "success": true, "links": [...] }`.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{ToolDefinition, ToolResponse};
use crate::client::{ClientAccessor, MapPayload};
use crate::error::ToolError;
use crate::schema::{Field, Schema};

pub const MAP_TOOL: &str = "firecrawl_map";

const DESCRIPTION: &str = "Generate a sitemap of a given site";

/// Validated input of `firecrawl_map`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapParams {
    pub url: String,
    #[serde(default)]
    pub search: Option<String>,
    pub ignore_sitemap: bool,
    pub include_subdomains: bool,
    pub limit: u64,
}

impl From<MapParams> for MapPayload {
    fn from(params: MapParams) -> Self {
        Self {
            url: params.url,
            search: params.search,
            ignore_sitemap: params.ignore_sitemap,
            include_subdomains: params.include_subdomains,
            limit: params.limit,
        }
    }
}

pub fn map_schema() -> Schema {
    Schema::new()
        .field(Field::url("url", "The URL to start mapping from (required)").required())
        .field(Field::string("search", "Search query to use for mapping"))
        .field(
            Field::boolean("ignoreSitemap", "Whether to ignore the website's sitemap")
                .with_default(json!(true)),
        )
        .field(
            Field::boolean("includeSubdomains", "Include subdomains of the website")
                .with_default(json!(false)),
        )
        .field(
            Field::integer("limit", 1, "Maximum number of links to return")
                .with_default(json!(5000)),
        )
}

pub fn map_tool(clients: Arc<ClientAccessor>) -> ToolDefinition {
    ToolDefinition::wrap(MAP_TOOL, DESCRIPTION, map_schema(), move |params: MapParams| {
        let clients = clients.clone();
        async move { execute(&clients, params).await }
    })
}

async fn execute(clients: &ClientAccessor, params: MapParams) -> anyhow::Result<ToolResponse> {
    let url = params.url.clone();
    let client = clients.get()?;
    let result = client.generate_sitemap(params.into()).await?;

    let links = extract_links(&result)?;
    Ok(ToolResponse::text(format_sitemap(&url, &links)))
}

/// Check the result shape and pull out the link list.
fn extract_links(result: &Value) -> Result<Vec<String>, ToolError> {
    let success = result
        .as_object()
        .and_then(|object| object.get("success"))
        .and_then(Value::as_bool)
        .ok_or_else(|| {
            ToolError::Validation("Invalid sitemap result: missing success flag".to_string())
        })?;

    if !success {
        if let Some(reason) = result.get("error").and_then(Value::as_str) {
            log::warn!("Sitemap generation reported failure: {reason}");
        }
        return Err(ToolError::Validation("Sitemap generation failed".to_string()));
    }

    let links = match result.get("links") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(link) => link.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(links)
}

/// Markdown listing of `links`, numbered from 1 in the order given.
pub fn format_sitemap(url: &str, links: &[String]) -> String {
    let mut text = format!("# Sitemap for {url}\n\n");

    if links.is_empty() {
        text.push_str("No URLs found in the sitemap.\n");
    } else {
        let _ = write!(text, "Found {} URLs:\n\n", links.len());
        for (index, link) in links.iter().enumerate() {
            let _ = writeln!(text, "{}. {}", index + 1, link);
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_sitemap() {
        assert_eq!(
            format_sitemap("https://example.com", &[]),
            "# Sitemap for https://example.com\n\nNo URLs found in the sitemap.\n"
        );
    }

    #[test]
    fn test_format_preserves_order() {
        let links = vec![
            "https://example.com/z".to_string(),
            "https://example.com/a".to_string(),
        ];
        assert_eq!(
            format_sitemap("https://example.com", &links),
            "# Sitemap for https://example.com\n\nFound 2 URLs:\n\n1. https://example.com/z\n2. https://example.com/a\n"
        );
    }

    #[test]
    fn test_extract_links_shapes() {
        assert_eq!(
            extract_links(&json!({ "success": true, "links": ["https://a.dev"] })),
            Ok(vec!["https://a.dev".to_string()])
        );
        assert_eq!(extract_links(&json!({ "success": true })), Ok(vec![]));
        assert_eq!(
            extract_links(&json!({ "success": true, "links": "https://a.dev" })),
            Ok(vec![])
        );
    }

    #[test]
    fn test_extract_links_failures() {
        assert_eq!(
            extract_links(&json!({ "success": false, "error": "blocked" })),
            Err(ToolError::Validation("Sitemap generation failed".to_string()))
        );
        assert_eq!(
            extract_links(&json!({ "urls": ["https://a.dev"] })),
            Err(ToolError::Validation(
                "Invalid sitemap result: missing success flag".to_string()
            ))
        );
        assert_eq!(
            extract_links(&Value::Null),
            Err(ToolError::Validation(
                "Invalid sitemap result: missing success flag".to_string()
            ))
        );
        assert!(extract_links(&json!({ "success": "yes" })).is_err());
    }

    #[test]
    fn test_schema_defaults() {
        let value = map_schema()
            .validate(&json!({ "url": "https://example.com", "limit": 5 }))
            .expect("valid");
        let params: MapParams = serde_json::from_value(value).expect("deserializes");

        assert_eq!(
            params,
            MapParams {
                url: "https://example.com".to_string(),
                search: None,
                ignore_sitemap: true,
                include_subdomains: false,
                limit: 5,
            }
        );
    }
}
