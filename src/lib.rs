//! Firecrawl MCP server: `firecrawl_scrape` and `firecrawl_map` exposed as MCP tools.
//!
//! Every tool call is validated against a data-described schema, forwarded to a
//! Firecrawl Simple API through a single lazily-built client, and rendered back as
//! a one-block text envelope. Failures never escape a tool: they are classified
//! and returned as `isError: true` envelopes.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod schema;
pub mod server;
pub mod tools;

pub use client::{ClientAccessor, FirecrawlApi, FirecrawlClient, MapPayload, ScrapeFormat, ScrapePayload};
pub use config::Config;
pub use error::{format_error_message, ErrorCategory};
pub use server::FirecrawlMcpServer;
pub use tools::{ToolCatalog, ToolDefinition, ToolResponse};
