use std::collections::HashMap;
use std::sync::RwLock;

/// Best-effort mapping from raw input text to a previously produced output.
///
/// A hit only skips the upstream call; every transform still archives a new
/// row, and entries are not invalidated when an archive write fails. Two
/// concurrent misses on the same text may both call upstream; the second
/// write wins and both rows are archived.
pub trait TransformCache: Send + Sync {
    fn get(&self, text: &str) -> Option<String>;
    fn put(&self, text: &str, output: &str);
}

/// Cache policy for deployments that want every submission to hit upstream.
pub struct NoopCache;

impl TransformCache for NoopCache {
    fn get(&self, _text: &str) -> Option<String> {
        None
    }

    fn put(&self, _text: &str, _output: &str) {}
}

/// Process-local cache shared across request tasks. Reads take the shared
/// lock; only a fill takes the exclusive lock.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransformCache for MemoryCache {
    fn get(&self, text: &str) -> Option<String> {
        self.entries
            .read()
            .expect("cache lock poisoned")
            .get(text)
            .cloned()
    }

    fn put(&self, text: &str, output: &str) {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(text.to_string(), output.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_cache_never_hits() {
        let cache = NoopCache;
        cache.put("hello", "out");
        assert_eq!(cache.get("hello"), None);
    }

    #[test]
    fn memory_cache_round_trip() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("hello"), None);
        cache.put("hello", "🚀 hello");
        assert_eq!(cache.get("hello"), Some("🚀 hello".to_string()));
        assert_eq!(cache.get("other"), None);
    }

    #[test]
    fn memory_cache_last_write_wins() {
        let cache = MemoryCache::new();
        cache.put("hello", "first");
        cache.put("hello", "second");
        assert_eq!(cache.get("hello"), Some("second".to_string()));
    }
}
