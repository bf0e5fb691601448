use serde::{Serialize, Deserialize};
use crate::index::entry::PayloadRef;

/// Business term, optionally bound to a domain by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub ko_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Vocabulary word used as a naming building block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub ko_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub is_form_word: bool,
}

impl Word {
    pub fn new(ko_name: impl Into<String>) -> Self {
        Word {
            ko_name: ko_name.into(),
            en_name: None,
            abbr: None,
            description: None,
            synonyms: Vec::new(),
            is_form_word: false,
        }
    }

    pub fn with_abbr(mut self, abbr: impl Into<String>) -> Self {
        self.abbr = Some(abbr.into());
        self
    }

    pub fn with_en_name(mut self, en_name: impl Into<String>) -> Self {
        self.en_name = Some(en_name.into());
        self
    }
}

impl From<&Term> for Word {
    /// Terms join the name builder as plain (non-linking) words.
    fn from(term: &Term) -> Self {
        Word {
            ko_name: term.ko_name.clone(),
            en_name: None,
            abbr: term.abbr.clone(),
            description: term.description.clone(),
            synonyms: term.synonyms.clone(),
            is_form_word: false,
        }
    }
}

/// Reusable column-type template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<String>,
}

impl Domain {
    pub fn new(name: impl Into<String>) -> Self {
        Domain {
            name: name.into(),
            data_type: None,
            length: None,
            scale: None,
            storage_format: None,
            display_format: None,
            allowed_values: None,
        }
    }

    pub fn with_type(mut self, data_type: impl Into<String>, length: Option<u32>, scale: Option<u32>) -> Self {
        self.data_type = Some(data_type.into());
        self.length = length;
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetCounts {
    pub terms: u32,
    pub words: u32,
    pub domains: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<DatasetCounts>,
}

/// Immutable set of terms, words and domains. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub meta: Option<DatasetMeta>,
    pub terms: Vec<Term>,
    pub words: Vec<Word>,
    pub domains: Vec<Domain>,
}

/// An entity a `PayloadRef` points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity<'a> {
    Term(&'a Term),
    Word(&'a Word),
    Domain(&'a Domain),
}

impl Dataset {
    pub fn new(terms: Vec<Term>, words: Vec<Word>, domains: Vec<Domain>) -> Self {
        Dataset { meta: None, terms, words, domains }
    }

    pub fn len(&self) -> usize {
        self.terms.len() + self.words.len() + self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn term(&self, index: usize) -> Option<&Term> {
        self.terms.get(index)
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn domain(&self, index: usize) -> Option<&Domain> {
        self.domains.get(index)
    }

    pub fn resolve(&self, payload: &PayloadRef) -> Option<Entity<'_>> {
        match *payload {
            PayloadRef::Term(index) => self.term(index).map(Entity::Term),
            PayloadRef::Word(index) => self.word(index).map(Entity::Word),
            PayloadRef::Domain(index) => self.domain(index).map(Entity::Domain),
        }
    }

    /// First domain whose name equals the trimmed `name`. Blank means no selection.
    pub fn find_domain_by_name(&self, name: Option<&str>) -> Option<&Domain> {
        let key = name.map(str::trim).unwrap_or_default();
        if key.is_empty() {
            return None;
        }
        self.domains.iter().find(|domain| domain.name == key)
    }

    /// Domain names that occur more than once, in first-occurrence order.
    pub fn duplicate_domain_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for domain in &self.domains {
            let name = domain.name.as_str();
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}
