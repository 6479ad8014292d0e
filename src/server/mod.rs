//! MCP server exposing the tool catalog.

mod transport;

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::Value;

use crate::tools::{ToolCatalog, ToolResponse};

/// Cheap to clone; clones share the catalog and its client accessor.
#[derive(Debug, Clone)]
pub struct FirecrawlMcpServer {
    catalog: Arc<ToolCatalog>,
}

impl FirecrawlMcpServer {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Tool descriptors in catalog order
    pub fn tool_list(&self) -> Vec<Tool> {
        self.catalog
            .tools()
            .iter()
            .map(|tool| Tool {
                name: tool.name().into(),
                title: None,
                description: Some(tool.description().into()),
                input_schema: Arc::new(tool.input_schema()),
                output_schema: None,
                annotations: None,
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Run the named tool. Only an unknown name is a protocol error; tool
    /// failures come back as `isError` envelopes.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<ToolResponse, McpError> {
        let tool = self
            .catalog
            .get(name)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {name}"), None))?;

        log::info!("Executing tool: {name}");

        let input = Value::Object(arguments.unwrap_or_default());
        Ok(tool.invoke(input).await)
    }
}

impl ServerHandler for FirecrawlMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Firecrawl Simple MCP server: scrape web pages and map site URLs".to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.tool_list();
        log::debug!("Serving {} tools", tools.len());
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let response = self.dispatch(&request.name, request.arguments).await?;
        Ok(response.into())
    }
}
