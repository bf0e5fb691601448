use crate::analysis::ngram::{bigrams, jaccard};
use crate::core::config::Config;
use crate::index::entry::SearchItemType;

/// Similarity between a normalized query and a normalized candidate text.
pub trait Scorer: Send + Sync {
    fn score(&self, query: &str, target: &str) -> f64;

    fn name(&self) -> &str;
}

/// Tiered string matching; the first tier that applies wins.
///
/// | match                         | score |
/// |-------------------------------|-------|
/// | equal                         | 1.0   |
/// | target starts with query      | 0.9   |
/// | target contains query         | 0.6   |
/// | a space-separated token equal | 0.7   |
/// | a token starts with query     | 0.55  |
pub struct TieredScorer;

impl TieredScorer {
    pub const EXACT: f64 = 1.0;
    pub const PREFIX: f64 = 0.9;
    pub const CONTAINS: f64 = 0.6;
    pub const TOKEN_EXACT: f64 = 0.7;
    pub const TOKEN_PREFIX: f64 = 0.55;
}

impl Scorer for TieredScorer {
    fn score(&self, query: &str, target: &str) -> f64 {
        if query == target {
            return Self::EXACT;
        }
        if target.starts_with(query) {
            return Self::PREFIX;
        }
        if target.contains(query) {
            return Self::CONTAINS;
        }

        let mut tokens = target.split(' ').filter(|token| !token.is_empty());
        if tokens.clone().any(|token| token == query) {
            return Self::TOKEN_EXACT;
        }
        if tokens.any(|token| token.starts_with(query)) {
            return Self::TOKEN_PREFIX;
        }
        0.0
    }

    fn name(&self) -> &str {
        "tiered"
    }
}

/// Jaccard similarity of character bigram sets.
pub struct BigramScorer;

impl Scorer for BigramScorer {
    fn score(&self, query: &str, target: &str) -> f64 {
        jaccard(&bigrams(query), &bigrams(target))
    }

    fn name(&self) -> &str {
        "bigram"
    }
}

pub fn type_boost(config: &Config, item_type: SearchItemType) -> f64 {
    match item_type {
        SearchItemType::Term => config.term_boost,
        SearchItemType::Word => config.word_boost,
        SearchItemType::Domain => config.domain_boost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_in_priority_order() {
        let scorer = TieredScorer;
        assert_eq!(scorer.score("reg", "reg"), 1.0);
        assert_eq!(scorer.score("reg", "reg dt"), 0.9);
        assert_eq!(scorer.score("dt", "reg dt"), 0.6);
        assert_eq!(scorer.score("등록", "고객등록일"), 0.6);
        assert_eq!(scorer.score("xyz", "reg dt"), 0.0);
    }

    #[test]
    fn bigram_score_is_jaccard() {
        let scorer = BigramScorer;
        assert_eq!(scorer.score("r", "reg"), 0.0);
        assert!((scorer.score("regi", "reg") - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn boosts_follow_config() {
        let config = Config::default();
        assert_eq!(type_boost(&config, SearchItemType::Term), 0.08);
        assert_eq!(type_boost(&config, SearchItemType::Word), 0.04);
        assert_eq!(type_boost(&config, SearchItemType::Domain), 0.0);
    }
}
