use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use crate::builder::case_style::CaseStyle;
use crate::core::error::Result;
use crate::sql::dialect::DbDialect;
use crate::storage::merge_policy::MergePolicy;

/// Persisted user configuration.
///
/// Enum-valued settings are kept as the strings they were stored with and read
/// back through the enums' `parse`, so a value written by a newer version
/// degrades to the default instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub use_custom_only: bool,
    pub enable_fuzzy: bool,
    pub db_dialect: String,
    pub merge_policy: String,
    pub default_case_style: String,
    pub custom_dataset_json: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            use_custom_only: false,
            enable_fuzzy: true,
            db_dialect: "Postgres".to_string(),
            merge_policy: MergePolicy::CustomFirst.as_str().to_string(),
            default_case_style: CaseStyle::SnakeUpper.as_str().to_string(),
            custom_dataset_json: None,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dialect(&self) -> DbDialect {
        DbDialect::parse(&self.db_dialect)
    }

    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy::parse(&self.merge_policy)
    }

    pub fn case_style(&self) -> CaseStyle {
        CaseStyle::parse(&self.default_case_style)
    }

    /// Override JSON, or `None` when unset or blank.
    pub fn custom_json(&self) -> Option<&str> {
        self.custom_dataset_json
            .as_deref()
            .filter(|json| !json.trim().is_empty())
    }

    /// True when switching from `self` to `other` changes the loaded dataset.
    pub fn dataset_inputs_differ(&self, other: &Settings) -> bool {
        self.use_custom_only != other.use_custom_only
            || self.merge_policy() != other.merge_policy()
            || self.custom_json() != other.custom_json()
    }
}

/// Live configuration shared between the session and the repository.
pub type SharedSettings = Arc<RwLock<Settings>>;

pub fn shared(settings: Settings) -> SharedSettings {
    Arc::new(RwLock::new(settings))
}

/// Search engine tuning.
#[derive(Debug, Clone)]
pub struct Config {
    pub default_limit: usize,

    // Below this base score the bigram fallback is tried
    pub fuzzy_threshold: f64,
    pub fuzzy_weight: f64,

    pub term_boost: f64,
    pub word_boost: f64,
    pub domain_boost: f64,

    pub search_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_limit: 50,
            fuzzy_threshold: 0.3,
            fuzzy_weight: 0.8,
            term_boost: 0.08,
            word_boost: 0.04,
            domain_boost: 0.0,
            search_cache_size: 256,
        }
    }
}
