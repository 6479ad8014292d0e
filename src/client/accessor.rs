use std::sync::{Arc, RwLock};

use super::{FirecrawlApi, FirecrawlClient};
use crate::config::ApiConfig;

/// Builds a fresh client handle
pub type ClientFactory = Arc<dyn Fn() -> anyhow::Result<Arc<dyn FirecrawlApi>> + Send + Sync>;

/// Lazily-built, process-wide client handle.
///
/// The first [`get`](Self::get) constructs a client through the factory and
/// caches it; later calls return the same handle until [`reset`](Self::reset).
/// Two concurrent first calls may both construct a client; the last one stored
/// wins and each caller keeps the handle it was given.
pub struct ClientAccessor {
    factory: ClientFactory,
    slot: RwLock<Option<Arc<dyn FirecrawlApi>>>,
}

impl ClientAccessor {
    /// Accessor that builds a [`FirecrawlClient`] from `config`.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_factory(Arc::new(move || -> anyhow::Result<Arc<dyn FirecrawlApi>> {
            let client = FirecrawlClient::new(config.url.clone(), config.key.clone())?;
            Ok(Arc::new(client) as Arc<dyn FirecrawlApi>)
        }))
    }

    pub fn with_factory(factory: ClientFactory) -> Self {
        Self {
            factory,
            slot: RwLock::new(None),
        }
    }

    /// Accessor that always hands out `client`, e.g. a test stub.
    pub fn from_client(client: Arc<dyn FirecrawlApi>) -> Self {
        Self::with_factory(Arc::new(move || -> anyhow::Result<Arc<dyn FirecrawlApi>> {
            Ok(client.clone())
        }))
    }

    /// Return the cached handle, constructing it on first use.
    pub fn get(&self) -> anyhow::Result<Arc<dyn FirecrawlApi>> {
        if let Some(client) = self
            .slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return Ok(client.clone());
        }

        log::debug!("Creating new FirecrawlClient instance");
        let client = (self.factory)()?;
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(client.clone());
        Ok(client)
    }

    /// Drop the cached handle; the next `get` builds a new one.
    ///
    /// Calls already holding the old handle keep using it.
    pub fn reset(&self) {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

impl std::fmt::Debug for ClientAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAccessor")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
