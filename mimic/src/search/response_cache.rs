use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Thread-safe memo of personalized answers keyed by canonical question.
///
/// Unbounded unless a capacity is given. Reads and writes of one key never
/// interleave: [`insert_if_absent`](Self::insert_if_absent) keeps the first
/// stored value so racing callers all observe the same answer.
#[derive(Clone)]
pub struct ResponseCache {
    cache: Arc<Mutex<LruCache<String, String>>>,
}

impl ResponseCache {
    /// `capacity == 0` keeps every entry for the life of the cache.
    pub fn new(capacity: usize) -> Self {
        let cache = match NonZeroUsize::new(capacity) {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Trimmed, lowercased question.
    pub fn canonical_key(question: &str) -> String {
        question.trim().to_lowercase()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Store `value` unless `key` already has one, returning whichever value
    /// ends up cached.
    pub fn insert_if_absent(&self, key: String, value: String) -> String {
        let mut cache = self.lock();
        if let Some(existing) = cache.get(&key) {
            return existing.clone();
        }
        cache.put(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cache_hit_after_insert() {
        let cache = ResponseCache::new(0);
        let key = ResponseCache::canonical_key("Nasılsın?");
        cache.insert_if_absent(key.clone(), "iyiyim".to_string());
        assert_eq!(cache.get(&key), Some("iyiyim".to_string()));
    }

    #[test]
    fn test_cache_miss() {
        let cache = ResponseCache::new(0);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_canonical_key_trims_and_lowercases() {
        assert_eq!(
            ResponseCache::canonical_key("  What Do You THINK?  "),
            "what do you think?"
        );
    }

    #[test]
    fn test_first_writer_wins() {
        let cache = ResponseCache::new(0);
        assert_eq!(cache.insert_if_absent("q".into(), "first".into()), "first");
        assert_eq!(cache.insert_if_absent("q".into(), "second".into()), "first");
        assert_eq!(cache.get("q"), Some("first".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unbounded_by_default() {
        let cache = ResponseCache::new(0);
        for i in 0..1000 {
            cache.insert_if_absent(format!("q{i}"), format!("a{i}"));
        }
        assert_eq!(cache.len(), 1000);
        assert_eq!(cache.get("q0"), Some("a0".to_string()));
    }

    #[test]
    fn test_capacity_enforcement() {
        let cache = ResponseCache::new(2);
        cache.insert_if_absent("q1".into(), "a1".into());
        cache.insert_if_absent("q2".into(), "a2".into());
        cache.insert_if_absent("q3".into(), "a3".into());

        assert_eq!(cache.get("q1"), None);
        assert_eq!(cache.get("q2"), Some("a2".to_string()));
        assert_eq!(cache.get("q3"), Some("a3".to_string()));
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ResponseCache::new(4);
        assert!(cache.is_empty());
        cache.insert_if_absent("q".into(), "a".into());
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_concurrent_same_key_sees_one_value() {
        let cache = ResponseCache::new(0);
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || cache.insert_if_absent("shared".into(), format!("v{i}")))
            })
            .collect();

        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = cache.get("shared").unwrap();
        assert!(results.iter().all(|r| *r == stored));
    }
}
