use std::sync::Arc;
use std::time::Duration;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::services::providers::{FilePursuitProvider, SearchProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SearchProvider>,
    pub cache: ResponseCache,
    /// `cacheMaxAge` attached to stream responses, in seconds
    pub stream_cache_max_age: u64,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        cache: ResponseCache,
        stream_cache_max_age: u64,
    ) -> Self {
        Self {
            provider,
            cache,
            stream_cache_max_age,
        }
    }

    /// Builds the state for a running server: FilePursuit plus an empty cache
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(FilePursuitProvider::new(config.search_url.clone())),
            ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)),
            config.stream_cache_max_age_secs,
        )
    }
}
