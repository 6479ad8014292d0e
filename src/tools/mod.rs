//! Tool definitions and the invocation wrapper.
//!
//! [`ToolDefinition::wrap`] binds a name, description, schema and executor into
//! a unit whose [`invoke`](ToolDefinition::invoke) never fails: validation and
//! execution errors both come back as `isError: true` envelopes.

mod map;
mod response;
mod scrape;

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client::ClientAccessor;
use crate::config::Config;
use crate::error::{handle_error, ErrorContext};
use crate::schema::{Schema, SchemaError};

pub use map::{format_sitemap, map_schema, map_tool, MapParams, MAP_TOOL};
pub use response::{ToolContent, ToolResponse};
pub use scrape::{scrape_schema, scrape_tool, ScrapeParams, SCRAPE_TOOL};

type Executor = Arc<dyn Fn(Value) -> BoxFuture<'static, anyhow::Result<ToolResponse>> + Send + Sync>;

/// A named, schema-validated tool
#[derive(Clone)]
pub struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    schema: Arc<Schema>,
    executor: Executor,
}

impl ToolDefinition {
    /// Wrap `execute` with validation, logging and error enveloping.
    ///
    /// `execute` receives the validated, defaulted parameters deserialized into `P`.
    pub fn wrap<P, F, Fut>(
        name: &'static str,
        description: &'static str,
        schema: Schema,
        execute: F,
    ) -> Self
    where
        P: DeserializeOwned + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<ToolResponse>> + Send + 'static,
    {
        let executor: Executor = Arc::new(
            move |validated: Value| -> BoxFuture<'static, anyhow::Result<ToolResponse>> {
                match serde_json::from_value::<P>(validated) {
                    Ok(params) => Box::pin(execute(params)),
                    Err(e) => {
                        let error = anyhow::Error::new(SchemaError::from_serde(e));
                        Box::pin(futures::future::ready(Err(error)))
                    }
                }
            },
        );

        Self {
            name,
            description,
            schema: Arc::new(schema),
            executor,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// JSON Schema advertised in `tools/list`
    pub fn input_schema(&self) -> Map<String, Value> {
        self.schema.to_json_schema()
    }

    /// Validate `input`, run the executor, and envelope any failure.
    pub async fn invoke(&self, input: Value) -> ToolResponse {
        match self.try_invoke(&input).await {
            Ok(response) => response,
            Err(error) => handle_error(
                &error,
                ErrorContext {
                    tool_name: self.name,
                    operation: Some("execution"),
                    input: Some(&input),
                },
            ),
        }
    }

    async fn try_invoke(&self, input: &Value) -> anyhow::Result<ToolResponse> {
        let params = self.schema.validate(input)?;
        log::info!("Executing {} tool with params: {}", self.name, params);
        (self.executor)(params).await
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),
}

/// Ordered set of tools with unique names
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<ToolDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name()) {
                return Err(CatalogError::DuplicateTool(tool.name().to_string()));
            }
        }
        Ok(Self { tools })
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name() == name)
    }
}

/// The server's tool catalog: scrape, then map.
pub fn catalog(clients: Arc<ClientAccessor>, config: &Config) -> Result<ToolCatalog, CatalogError> {
    ToolCatalog::new(vec![
        scrape_tool(clients.clone(), config.api.timeout_ms),
        map_tool(clients),
    ])
}
