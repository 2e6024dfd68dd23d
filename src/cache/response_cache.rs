use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::models::Stream;

/// A cached stream lookup
struct CacheEntry {
    streams: Vec<Stream>,
    stored_at: Instant,
    /// Distinguishes this entry from a later one stored under the same id
    generation: u64,
}

/// In-memory cache of stream lookups keyed by catalog item id
///
/// Every `put` arms one removal task for the entry it stored. Entries are never
/// refreshed on read and the map is not bounded by size; the TTL is the only
/// eviction.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    next_generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Returns the cached streams for `id` unless the entry is missing or expired
    pub async fn get(&self, id: &str) -> Option<Vec<Stream>> {
        let entries = self.entries.read().await;
        match entries.get(id) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                tracing::debug!(id = %id, streams = entry.streams.len(), "Cache hit");
                Some(entry.streams.clone())
            }
            _ => {
                tracing::debug!(id = %id, "Cache miss");
                None
            }
        }
    }

    /// Stores `streams` under `id`, replacing any previous entry wholesale
    ///
    /// Must be called from within a tokio runtime: the removal of the entry is
    /// scheduled as a background task that fires once the TTL has elapsed.
    pub async fn put(&self, id: String, streams: Vec<Stream>) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entry = CacheEntry {
            streams,
            stored_at: Instant::now(),
            generation,
        };

        tracing::debug!(
            id = %id,
            streams = entry.streams.len(),
            ttl_secs = self.ttl.as_secs(),
            "Cached streams"
        );

        self.entries.write().await.insert(id.clone(), entry);

        let entries = Arc::clone(&self.entries);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            Self::expire(&entries, &id, generation).await;
        });
    }

    /// Removes the entry for `id` only if it is still the one armed with `generation`
    async fn expire(entries: &RwLock<HashMap<String, CacheEntry>>, id: &str, generation: u64) {
        let mut entries = entries.write().await;
        if entries.get(id).is_some_and(|e| e.generation == generation) {
            entries.remove(id);
            tracing::debug!(id = %id, "Cache entry expired");
        }
    }

    /// Number of live entries; one past its TTL is not counted even before its removal runs
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
