use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use firecrawl_mcp::{
    ClientAccessor, Config, FirecrawlMcpServer,
    cli::Cli,
    config::{LogLevel, TransportType},
    tools,
};

const BANNER: &str = r"
╔═══════════════════════════════════════════════════════════╗
║                                                           ║
║   Firecrawl MCP Server                                    ║
║   Web scraping and site mapping for LLMs via MCP          ║
║                                                           ║
╚═══════════════════════════════════════════════════════════╝";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments (flags fall back to FIRECRAWL_* environment variables)
    let cli = Cli::parse();

    let loaded = Config::from_cli(&cli);

    // The level is needed before the configuration errors can be reported
    let level = match &loaded {
        Ok(config) => config.server.log_level,
        Err(_) => cli.log_level.parse::<LogLevel>().unwrap_or_default(),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_filter())).init();

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            log::warn!("Using default configuration");
            Config::default()
        }
    };

    let clients = Arc::new(ClientAccessor::new(config.api.clone()));
    let catalog = tools::catalog(clients, &config)?;

    // Handle list-tools flag
    if cli.list_tools {
        println!("Available tools:");
        for tool in catalog.tools() {
            println!("  - {}: {}", tool.name(), tool.description());
        }
        return Ok(());
    }

    log::info!("{BANNER}");
    log::info!("Starting Firecrawl MCP Server");
    log::info!("Using Firecrawl API URL: {}", config.api.url);
    log::info!("Server version: {}", config.version);
    if config.api.key.is_none() {
        log::debug!("No API key configured; requests are sent without credentials");
    }

    let names: Vec<&str> = catalog.tools().iter().map(|tool| tool.name()).collect();
    log::info!("Available tools ({}): {}", catalog.tools().len(), names.join(", "));

    let shutdown_token = tokio_util::sync::CancellationToken::new();

    // Spawn cross-platform signal handler
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        wait_for_interrupt().await;
        log::info!("Received interrupt signal, shutting down");
        signal_token.cancel();
    });

    let server = FirecrawlMcpServer::new(catalog);
    match config.server.transport {
        TransportType::Stdio => server.serve_stdio(shutdown_token).await?,
        TransportType::Http => server.serve_http(config.server.port, shutdown_token).await?,
    }

    Ok(())
}

/// Wait for interrupt signal (cross-platform)
#[cfg(unix)]
async fn wait_for_interrupt() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm_result = signal(SignalKind::terminate());
    let mut sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result.as_mut(), sigint_result.as_mut()) {
        (Ok(sigterm), Ok(sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = sigint.recv() => {}
            }
        }
        (Ok(sigterm), Err(_)) => {
            let _ = sigterm.recv().await;
        }
        (Err(_), Ok(sigint)) => {
            let _ = sigint.recv().await;
        }
        (Err(_), Err(_)) => {
            let () = std::future::pending().await;
        }
    }
}

/// Wait for interrupt signal (cross-platform)
#[cfg(windows)]
async fn wait_for_interrupt() {
    match tokio::signal::windows::ctrl_c() {
        Ok(mut ctrl_c) => {
            let _ = ctrl_c.recv().await;
        }
        Err(_) => {
            let () = std::future::pending().await;
        }
    }
}
