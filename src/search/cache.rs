use std::num::NonZeroUsize;
use lru::LruCache;
use parking_lot::Mutex;
use crate::analysis::script::Script;
use crate::index::entry::{SearchItem, TypeFilter};

/// Identity of a search result page. The catalog version keeps pages from an
/// older dataset from ever being served.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SearchKey {
    pub query: String,
    pub script: Script,
    pub limit: usize,
    pub types: Option<TypeFilter>,
    pub fuzzy: bool,
    pub catalog_version: u64,
}

/// LRU cache of recent result pages, with lookup counters kept under the
/// same lock as the pages.
pub struct SearchCache {
    state: Mutex<CacheState>,
}

struct CacheState {
    pages: LruCache<SearchKey, Vec<SearchItem>>,
    hits: u64,
    misses: u64,
}

/// Snapshot of cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheUsage {
    pub hits: u64,
    pub misses: u64,
    pub pages: usize,
    pub capacity: usize,
}

impl CacheUsage {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

impl SearchCache {
    /// A zero capacity is raised to one page.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SearchCache {
            state: Mutex::new(CacheState { pages: LruCache::new(capacity), hits: 0, misses: 0 }),
        }
    }

    pub fn get(&self, key: &SearchKey) -> Option<Vec<SearchItem>> {
        let mut state = self.state.lock();
        match state.pages.get(key).cloned() {
            Some(page) => {
                state.hits += 1;
                Some(page)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    pub fn put(&self, key: SearchKey, results: Vec<SearchItem>) {
        self.state.lock().pages.put(key, results);
    }

    pub fn usage(&self) -> CacheUsage {
        let state = self.state.lock();
        CacheUsage {
            hits: state.hits,
            misses: state.misses,
            pages: state.pages.len(),
            capacity: state.pages.cap().get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(version: u64) -> SearchKey {
        SearchKey {
            query: "reg".to_string(),
            script: Script::Latin,
            limit: 50,
            types: None,
            fuzzy: true,
            catalog_version: version,
        }
    }

    #[test]
    fn tracks_hits_and_misses() {
        let cache = SearchCache::new(4);
        assert!(cache.get(&key(0)).is_none());
        cache.put(key(0), Vec::new());
        assert!(cache.get(&key(0)).is_some());
        assert!(cache.get(&key(1)).is_none());

        let usage = cache.usage();
        assert_eq!((usage.hits, usage.misses, usage.pages), (1, 2, 1));
        assert_eq!(usage.lookups(), 3);
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = SearchCache::new(1);
        cache.put(key(0), Vec::new());
        cache.put(key(1), Vec::new());
        assert!(cache.get(&key(0)).is_none());
        assert!(cache.get(&key(1)).is_some());
    }

    #[test]
    fn zero_capacity_still_caches_one_page() {
        assert_eq!(SearchCache::new(0).usage().capacity, 1);
    }
}
