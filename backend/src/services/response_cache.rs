use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CachedResponse {
    stored_at: Instant,
    body: Value,
}

/// Upstream JSON bodies keyed by request URL, fresh for a fixed window.
pub struct ResponseCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedResponse>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.body.clone())
    }

    pub async fn insert(&self, key: String, body: Value) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        if entries.len() < before {
            debug!("Evicted {} stale cached responses", before - entries.len());
        }
        entries.insert(
            key,
            CachedResponse {
                stored_at: Instant::now(),
                body,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
