//! In-process TTL cache.
//!
//! Stands in for the edge key-value store behind the quantum pages and
//! chat responses. Entries expire lazily on read.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Thread-safe string cache with a fixed TTL.
pub struct TtlCache {
    entries: DashMap<String, (Instant, String)>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                let (stored, value) = entry.value();
                if stored.elapsed() < self.ttl {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn put(&self, key: &str, value: String) {
        self.entries.insert(key.to_string(), (Instant::now(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.put("solutions", "<html>".to_string());
        assert_eq!(cache.get("solutions").as_deref(), Some("<html>"));
    }

    #[test]
    fn expired_entries_miss() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.put("chat:what", "answer".to_string());
        assert!(cache.get("chat:what").is_none());
    }
}
