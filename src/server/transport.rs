use std::net::SocketAddr;

use anyhow::{Context, Result};
use rmcp::{
    ServiceExt,
    transport::{
        StreamableHttpServerConfig, stdio,
        streamable_http_server::{session::local::LocalSessionManager, tower::StreamableHttpService},
    },
};
use tokio_util::sync::CancellationToken;

use super::FirecrawlMcpServer;

impl FirecrawlMcpServer {
    /// Serve over stdin/stdout until the client disconnects or `shutdown` fires.
    pub async fn serve_stdio(self, shutdown: CancellationToken) -> Result<()> {
        log::info!("Running Firecrawl MCP Server on stdio");

        let service = self
            .serve_with_ct(stdio(), shutdown)
            .await
            .inspect_err(|e| {
                log::error!("serving error: {e:?}");
            })?;
        let reason = service.waiting().await?;

        log::info!("Stdio server stopped: {reason:?}");
        Ok(())
    }

    /// Serve streamable HTTP on `0.0.0.0:<port>` at `/mcp` until `shutdown` fires.
    pub async fn serve_http(self, port: u16, shutdown: CancellationToken) -> Result<()> {
        let service = StreamableHttpService::new(
            move || Ok(self.clone()),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        log::info!("Running Firecrawl MCP Server on http://{addr}/mcp");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        log::info!("HTTP server stopped");
        Ok(())
    }
}
