use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use crate::index::entry::SearchItem;

/// An index item with its final score and its position in the index.
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub item: Arc<SearchItem>,
    pub score: f64,
    pub ordinal: usize,
}

impl ScoredItem {
    /// Copy of the item carrying the computed score and the version of the
    /// catalog it was ranked against.
    pub fn into_item(self, catalog_version: u64) -> SearchItem {
        SearchItem { score: self.score, catalog_version, ..(*self.item).clone() }
    }

    /// Ranking order: higher score, then type priority, then title, then index
    /// position. `Less` means ranked first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other.score.total_cmp(&self.score)
            .then_with(|| self.item.item_type().priority().cmp(&other.item.item_type().priority()))
            .then_with(|| self.item.title.cmp(&other.item.title))
            .then_with(|| self.ordinal.cmp(&other.ordinal))
    }
}

// Greater means better ranked, so the heap root is the best item
impl PartialEq for ScoredItem {
    fn eq(&self, other: &Self) -> bool {
        self.rank_cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredItem {}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank_cmp(other).reverse()
    }
}

/// Keeps the best `k` items seen.
pub struct TopKCollector {
    heap: BinaryHeap<Reverse<ScoredItem>>,
    k: usize,
    pub total_collected: usize,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, scored: ScoredItem) {
        self.total_collected += 1;
        if self.k == 0 {
            return;
        }

        if self.heap.len() < self.k {
            self.heap.push(Reverse(scored));
        } else if let Some(Reverse(worst)) = self.heap.peek() {
            if scored > *worst {
                self.heap.pop();
                self.heap.push(Reverse(scored));
            }
        }
    }

    /// Collected items, best first.
    pub fn into_sorted(self) -> Vec<ScoredItem> {
        let mut results: Vec<_> = self.heap.into_iter().map(|Reverse(item)| item).collect();
        results.sort_by(ScoredItem::rank_cmp);
        results
    }
}
