use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchItemType {
    Term,
    Word,
    Domain,
}

impl SearchItemType {
    pub const ALL: [SearchItemType; 3] = [SearchItemType::Term, SearchItemType::Word, SearchItemType::Domain];

    /// Sort rank among equal scores; lower ranks first.
    pub fn priority(&self) -> u8 {
        match self {
            SearchItemType::Term => 0,
            SearchItemType::Word => 1,
            SearchItemType::Domain => 2,
        }
    }

    fn bit(&self) -> u8 {
        1 << self.priority()
    }
}

impl fmt::Display for SearchItemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            SearchItemType::Term => "TERM",
            SearchItemType::Word => "WORD",
            SearchItemType::Domain => "DOMAIN",
        })
    }
}

/// Set of item types a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeFilter(u8);

impl TypeFilter {
    pub fn all() -> Self {
        TypeFilter::from_iter(SearchItemType::ALL)
    }

    pub fn only(item_type: SearchItemType) -> Self {
        TypeFilter(item_type.bit())
    }

    pub fn contains(&self, item_type: SearchItemType) -> bool {
        self.0 & item_type.bit() != 0
    }
}

impl FromIterator<SearchItemType> for TypeFilter {
    fn from_iter<I: IntoIterator<Item = SearchItemType>>(iter: I) -> Self {
        TypeFilter(iter.into_iter().fold(0, |bits, t| bits | t.bit()))
    }
}

/// Position of an entity in the dataset the index was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadRef {
    Term(usize),
    Word(usize),
    Domain(usize),
}

impl PayloadRef {
    pub fn item_type(&self) -> SearchItemType {
        match self {
            PayloadRef::Term(_) => SearchItemType::Term,
            PayloadRef::Word(_) => SearchItemType::Word,
            PayloadRef::Domain(_) => SearchItemType::Domain,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            PayloadRef::Term(index) | PayloadRef::Word(index) | PayloadRef::Domain(index) => index,
        }
    }
}

/// Display record for one dataset entity; `score` is filled in by search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchItem {
    pub title: String,
    pub primary_en: Option<String>,
    pub abbr: Option<String>,
    pub sub_text: Option<String>,
    pub score: f64,
    pub payload: PayloadRef,
    /// Version of the catalog whose dataset `payload` points into.
    pub catalog_version: u64,
}

impl SearchItem {
    pub fn item_type(&self) -> SearchItemType {
        self.payload.item_type()
    }

    /// Text copied or inserted when the item is picked.
    pub fn selected_text(&self) -> &str {
        match self.item_type() {
            SearchItemType::Term | SearchItemType::Word => self.abbr.as_deref()
                .or(self.primary_en.as_deref())
                .unwrap_or(&self.title),
            SearchItemType::Domain => &self.title,
        }
    }
}

/// Normalized match text for one item, in both scripts.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    pub local_text: String,
    pub latin_text: String,
    pub item: Arc<SearchItem>,
}

/// Flat searchable projection of a dataset.
///
/// `items[i]` and `entries[i].item` are the same item, in terms ++ words ++
/// domains order, and every payload index is valid against the source dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    pub items: Vec<Arc<SearchItem>>,
    pub entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
