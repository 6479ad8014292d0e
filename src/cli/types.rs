use clap::Parser;

/// Firecrawl MCP Server - web scraping tools for LLMs via MCP
///
/// Available tools:
/// - `firecrawl_scrape`: Scrape content from a URL
/// - `firecrawl_map`: Generate a sitemap of a given site
///
/// Values are read as raw strings and validated by the config loader, which
/// falls back to defaults instead of refusing to start.
#[derive(Parser, Debug, Clone)]
#[command(name = "firecrawl-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Firecrawl Simple API
    ///
    /// Example: --api-url http://localhost:3002/v1
    #[arg(
        long,
        value_name = "URL",
        env = "FIRECRAWL_API_URL",
        default_value = "http://localhost:3002/v1"
    )]
    pub api_url: String,

    /// API key sent as a bearer token (optional for self-hosted instances)
    #[arg(long, value_name = "KEY", env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Default scrape timeout in milliseconds (default: 30000)
    #[arg(
        long,
        value_name = "MILLIS",
        env = "FIRECRAWL_API_TIMEOUT",
        default_value = "30000"
    )]
    pub api_timeout: String,

    /// Port for the HTTP transport (default: 3003)
    #[arg(
        long,
        value_name = "PORT",
        env = "FIRECRAWL_SERVER_PORT",
        default_value = "3003"
    )]
    pub port: String,

    /// Transport to serve on: stdio or http ("sse" is accepted as an alias of http)
    #[arg(
        long,
        value_name = "TRANSPORT",
        env = "FIRECRAWL_TRANSPORT_TYPE",
        default_value = "stdio"
    )]
    pub transport: String,

    /// Log level: DEBUG, INFO, WARN or ERROR (RUST_LOG overrides)
    #[arg(
        long,
        value_name = "LEVEL",
        env = "FIRECRAWL_LOG_LEVEL",
        default_value = "INFO"
    )]
    pub log_level: String,

    /// List available tool names and exit
    #[arg(long)]
    pub list_tools: bool,
}
