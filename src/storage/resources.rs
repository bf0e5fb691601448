use std::collections::HashMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use serde_json::Value;
use tracing::warn;
use crate::core::types::{Dataset, DatasetMeta, Domain, Term, Word};
use crate::storage::parser::DatasetParser;

pub const META_RESOURCE: &str = "meta.json";
pub const TERMS_RESOURCE: &str = "terms.json";
pub const WORDS_RESOURCE: &str = "words.json";
pub const DOMAINS_RESOURCE: &str = "domains.json";

/// Where the base dataset's JSON documents come from.
pub trait ResourceSource: Send + Sync {
    /// Raw bytes of `name`, or `None` when the resource does not exist.
    fn read(&self, name: &str) -> Option<Vec<u8>>;

    fn describe(&self) -> String;
}

/// Dataset compiled into the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSource;

impl ResourceSource for BundledSource {
    fn read(&self, name: &str) -> Option<Vec<u8>> {
        let bytes: &'static [u8] = match name {
            META_RESOURCE => include_bytes!("../../data/meta.json"),
            TERMS_RESOURCE => include_bytes!("../../data/terms.json"),
            WORDS_RESOURCE => include_bytes!("../../data/words.json"),
            DOMAINS_RESOURCE => include_bytes!("../../data/domains.json"),
            _ => return None,
        };
        Some(bytes.to_vec())
    }

    fn describe(&self) -> String {
        "bundled".to_string()
    }
}

/// Resources read from files in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    pub root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource { root: root.into() }
    }
}

impl ResourceSource for DirectorySource {
    fn read(&self, name: &str) -> Option<Vec<u8>> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == IoErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read dataset resource");
                None
            }
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory resources, keyed by file name.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        MemorySource::default()
    }

    pub fn with(mut self, name: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(name.to_string(), contents.into());
        self
    }
}

impl ResourceSource for MemorySource {
    fn read(&self, name: &str) -> Option<Vec<u8>> {
        self.files.get(name).cloned()
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}

/// Loads the base dataset. A missing or malformed resource is logged and
/// contributes nothing; loading itself never fails.
pub struct ResourceDatasetLoader<'a> {
    source: &'a dyn ResourceSource,
    parser: DatasetParser,
}

impl<'a> ResourceDatasetLoader<'a> {
    pub fn new(source: &'a dyn ResourceSource) -> Self {
        ResourceDatasetLoader { source, parser: DatasetParser::new() }
    }

    pub fn load(&self) -> Dataset {
        Dataset {
            meta: self.load_meta(),
            terms: self.load_terms(),
            words: self.load_words(),
            domains: self.load_domains(),
        }
    }

    fn load_meta(&self) -> Option<DatasetMeta> {
        match self.read_json(META_RESOURCE)? {
            Value::Object(obj) => Some(self.parser.parse_meta(&obj)),
            _ => {
                warn!(resource = META_RESOURCE, "dataset resource is not a JSON object");
                None
            }
        }
    }

    fn load_terms(&self) -> Vec<Term> {
        self.read_array(TERMS_RESOURCE)
            .map(|items| self.parser.parse_terms(&items))
            .unwrap_or_default()
    }

    fn load_words(&self) -> Vec<Word> {
        self.read_array(WORDS_RESOURCE)
            .map(|items| self.parser.parse_words(&items))
            .unwrap_or_default()
    }

    fn load_domains(&self) -> Vec<Domain> {
        self.read_array(DOMAINS_RESOURCE)
            .map(|items| self.parser.parse_domains(&items))
            .unwrap_or_default()
    }

    fn read_array(&self, name: &str) -> Option<Vec<Value>> {
        match self.read_json(name)? {
            Value::Array(items) => Some(items),
            _ => {
                warn!(resource = name, "dataset resource is not a JSON array");
                None
            }
        }
    }

    fn read_json(&self, name: &str) -> Option<Value> {
        let Some(bytes) = self.source.read(name) else {
            warn!(resource = name, source = %self.source.describe(), "dataset resource not found");
            return None;
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(resource = name, error = %e, "dataset resource is not valid JSON");
                None
            }
        }
    }
}
