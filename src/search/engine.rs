use tracing::debug;
use crate::analysis::script::Script;
use crate::core::config::Config;
use crate::index::entry::{SearchIndex, SearchItem, TypeFilter};
use crate::scoring::scorer::{type_boost, BigramScorer, Scorer, TieredScorer};
use crate::search::cache::{CacheUsage, SearchCache, SearchKey};
use crate::search::results::{ScoredItem, TopKCollector};
use crate::storage::repository::Catalog;

/// A search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
    pub types: Option<TypeFilter>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        SearchQuery { text: text.into(), limit, types: None }
    }

    pub fn with_types(mut self, types: TypeFilter) -> Self {
        self.types = Some(types);
        self
    }
}

/// Scores every index entry against a query and returns the best page.
pub struct SearchEngine {
    config: Config,
    matcher: Box<dyn Scorer>,
    fuzzy: Box<dyn Scorer>,
    cache: SearchCache,
}

impl SearchEngine {
    pub fn new(config: Config) -> Self {
        let cache = SearchCache::new(config.search_cache_size);
        SearchEngine {
            config,
            matcher: Box::new(TieredScorer),
            fuzzy: Box::new(BigramScorer),
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache_usage(&self) -> CacheUsage {
        self.cache.usage()
    }

    /// Search a catalog's index, reusing cached pages for the same catalog version.
    pub fn search(&self, catalog: &Catalog, query: &SearchQuery, fuzzy: bool) -> Vec<SearchItem> {
        let Some((script, normalized)) = prepare(&query.text) else {
            return Vec::new();
        };

        let key = SearchKey {
            query: normalized,
            script,
            limit: query.limit,
            types: query.types,
            fuzzy,
            catalog_version: catalog.version,
        };
        if let Some(hit) = self.cache.get(&key) {
            debug!(query = %key.query, version = key.catalog_version, "search cache hit");
            return hit;
        }

        let results = self.run(&catalog.index, catalog.version, script, &key.query, query, fuzzy);
        self.cache.put(key, results.clone());
        results
    }

    /// Search an index directly, without the cache. Results carry catalog
    /// version 0.
    pub fn search_index(&self, index: &SearchIndex, query: &SearchQuery, fuzzy: bool) -> Vec<SearchItem> {
        match prepare(&query.text) {
            Some((script, normalized)) => self.run(index, 0, script, &normalized, query, fuzzy),
            None => Vec::new(),
        }
    }

    /// Text score of one candidate before the type boost; zero means no match.
    pub fn match_score(&self, query: &str, target: &str, fuzzy: bool) -> f64 {
        let score = self.matcher.score(query, target);
        if fuzzy && score < self.config.fuzzy_threshold {
            let similarity = self.fuzzy.score(query, target);
            if similarity > score {
                return similarity * self.config.fuzzy_weight;
            }
        }
        score
    }

    fn run(
        &self,
        index: &SearchIndex,
        version: u64,
        script: Script,
        normalized: &str,
        query: &SearchQuery,
        fuzzy: bool,
    ) -> Vec<SearchItem> {
        let mut collector = TopKCollector::new(query.limit);

        for (ordinal, entry) in index.entries.iter().enumerate() {
            let item_type = entry.item.item_type();
            if query.types.is_some_and(|types| !types.contains(item_type)) {
                continue;
            }

            let target = match script {
                Script::Local => &entry.local_text,
                Script::Latin => &entry.latin_text,
            };
            if target.trim().is_empty() {
                continue;
            }

            let score = self.match_score(normalized, target, fuzzy);
            if score > 0.0 {
                collector.collect(ScoredItem {
                    item: entry.item.clone(),
                    score: score + type_boost(&self.config, item_type),
                    ordinal,
                });
            }
        }

        let matched = collector.total_collected;
        let results: Vec<SearchItem> = collector.into_sorted()
            .into_iter()
            .map(|scored| scored.into_item(version))
            .collect();
        debug!(query = normalized, ?script, matched, returned = results.len(), "search executed");
        results
    }
}

/// Detect the query's script and normalize it; `None` for queries that are
/// blank before or after normalization.
fn prepare(raw: &str) -> Option<(Script, String)> {
    let query = raw.trim();
    if query.is_empty() {
        return None;
    }
    let script = Script::detect(query);
    let normalized = script.normalize(query);
    (!normalized.trim().is_empty()).then_some((script, normalized))
}
