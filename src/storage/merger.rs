use std::collections::HashMap;
use crate::core::types::{Dataset, Domain, Term, Word};
use crate::storage::merge_policy::MergePolicy;

/// Which input list an entity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeSource {
    Base,
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Term,
    Word,
    Domain,
}

/// Identity of an entity during a merge.
///
/// Entities with a complete natural key merge by content. Entities without
/// one get a key tied to their source list and position, so they never
/// collide with anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MergeKey {
    Natural(String),
    Positional { source: MergeSource, kind: EntityKind, index: usize },
}

impl MergeKey {
    pub fn is_natural(&self) -> bool {
        matches!(self, MergeKey::Natural(_))
    }
}

pub trait Mergeable: Clone {
    const KIND: EntityKind;

    /// Content key, or `None` when the entity lacks the fields to build one.
    fn natural_key(&self) -> Option<String>;

    fn merge_key(&self, source: MergeSource, index: usize) -> MergeKey {
        match self.natural_key() {
            Some(key) => MergeKey::Natural(key),
            None => MergeKey::Positional { source, kind: Self::KIND, index },
        }
    }
}

fn name_abbr_key(ko_name: &str, abbr: Option<&str>) -> Option<String> {
    let ko_name = ko_name.trim();
    let abbr = abbr.map(str::trim).unwrap_or_default();
    if ko_name.is_empty() || abbr.is_empty() {
        None
    } else {
        Some(format!("{ko_name}::{abbr}"))
    }
}

impl Mergeable for Term {
    const KIND: EntityKind = EntityKind::Term;

    fn natural_key(&self) -> Option<String> {
        name_abbr_key(&self.ko_name, self.abbr.as_deref())
    }
}

impl Mergeable for Word {
    const KIND: EntityKind = EntityKind::Word;

    fn natural_key(&self) -> Option<String> {
        name_abbr_key(&self.ko_name, self.abbr.as_deref())
    }
}

impl Mergeable for Domain {
    const KIND: EntityKind = EntityKind::Domain;

    fn natural_key(&self) -> Option<String> {
        let name = self.name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Insertion-ordered map: overwriting a key replaces the value in place.
struct OrderedMerge<T> {
    slots: Vec<T>,
    positions: HashMap<MergeKey, usize>,
}

impl<T: Mergeable> OrderedMerge<T> {
    fn with_capacity(capacity: usize) -> Self {
        OrderedMerge {
            slots: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, key: MergeKey, item: T) {
        match self.positions.get(&key) {
            Some(&slot) => self.slots[slot] = item,
            None => {
                self.positions.insert(key, self.slots.len());
                self.slots.push(item);
            }
        }
    }

    fn insert_if_absent(&mut self, key: MergeKey, item: T) {
        if !self.positions.contains_key(&key) {
            self.insert(key, item);
        }
    }

    fn insert_all(&mut self, items: &[T], source: MergeSource) {
        for (index, item) in items.iter().enumerate() {
            self.insert(item.merge_key(source, index), item.clone());
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.slots
    }
}

/// Combine two entity lists under `policy`. The result has no duplicate keys.
pub fn merge_entities<T: Mergeable>(base: &[T], custom: &[T], policy: MergePolicy) -> Vec<T> {
    let mut merged = OrderedMerge::with_capacity(base.len() + custom.len());
    match policy {
        MergePolicy::CustomFirst => {
            merged.insert_all(base, MergeSource::Base);
            merged.insert_all(custom, MergeSource::Override);
        }
        MergePolicy::BaseFirst => {
            merged.insert_all(custom, MergeSource::Override);
            merged.insert_all(base, MergeSource::Base);
        }
        MergePolicy::DedupeBase => {
            merged.insert_all(base, MergeSource::Base);
            for (index, item) in custom.iter().enumerate() {
                merged.insert_if_absent(item.merge_key(MergeSource::Override, index), item.clone());
            }
        }
    }
    merged.into_vec()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetMerger;

impl DatasetMerger {
    pub fn new() -> Self {
        DatasetMerger
    }

    /// Merge `custom` into `base`. Metadata always comes from `base`.
    pub fn merge(&self, base: &Dataset, custom: &Dataset, policy: MergePolicy) -> Dataset {
        Dataset {
            meta: base.meta.clone(),
            terms: merge_entities(&base.terms, &custom.terms, policy),
            words: merge_entities(&base.words, &custom.words, policy),
            domains: merge_entities(&base.domains, &custom.domains, policy),
        }
    }
}
