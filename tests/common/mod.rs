//! Recording stand-in for the Firecrawl API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use firecrawl_mcp::{ClientAccessor, Config, FirecrawlApi, MapPayload, ScrapePayload, ToolCatalog};
use futures::future::BoxFuture;
use serde_json::Value;

/// Canned outcome of one stubbed call
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Fail(String),
}

impl<T: Clone> Reply<T> {
    fn result(&self) -> anyhow::Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Fail(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

/// Records every payload and answers with a fixed reply
pub struct RecordingClient {
    scrape_reply: Reply<Option<Value>>,
    map_reply: Reply<Value>,
    scrapes: Mutex<Vec<ScrapePayload>>,
    maps: Mutex<Vec<MapPayload>>,
}

impl RecordingClient {
    pub fn new(scrape_reply: Reply<Option<Value>>, map_reply: Reply<Value>) -> Arc<Self> {
        Arc::new(Self {
            scrape_reply,
            map_reply,
            scrapes: Mutex::new(Vec::new()),
            maps: Mutex::new(Vec::new()),
        })
    }

    pub fn scraping(reply: Reply<Option<Value>>) -> Arc<Self> {
        Self::new(reply, Reply::Fail("unexpected map call".to_string()))
    }

    pub fn mapping(reply: Reply<Value>) -> Arc<Self> {
        Self::new(Reply::Fail("unexpected scrape call".to_string()), reply)
    }

    pub fn scrapes(&self) -> Vec<ScrapePayload> {
        self.scrapes.lock().expect("scrape log").clone()
    }

    pub fn maps(&self) -> Vec<MapPayload> {
        self.maps.lock().expect("map log").clone()
    }
}

impl FirecrawlApi for RecordingClient {
    fn scrape_webpage(&self, payload: ScrapePayload) -> BoxFuture<'_, anyhow::Result<Option<Value>>> {
        self.scrapes.lock().expect("scrape log").push(payload);
        let result = self.scrape_reply.result();
        Box::pin(async move { result })
    }

    fn generate_sitemap(&self, payload: MapPayload) -> BoxFuture<'_, anyhow::Result<Value>> {
        self.maps.lock().expect("map log").push(payload);
        let result = self.map_reply.result();
        Box::pin(async move { result })
    }
}

/// The server catalog wired to `client` with default configuration.
pub fn catalog_with(client: Arc<RecordingClient>) -> ToolCatalog {
    let clients = Arc::new(ClientAccessor::from_client(client));
    firecrawl_mcp::tools::catalog(clients, &Config::default()).expect("unique tool names")
}
