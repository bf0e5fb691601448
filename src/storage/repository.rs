use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};
use crate::core::config::{SharedSettings, Settings};
use crate::core::types::Dataset;
use crate::index::builder::SearchIndexBuilder;
use crate::index::entry::SearchIndex;
use crate::storage::custom::CustomDatasetLoader;
use crate::storage::merger::DatasetMerger;
use crate::storage::resources::{ResourceDatasetLoader, ResourceSource};

/// A dataset and the index built from it, published together.
///
/// Payload references in `index` are only meaningful against `dataset` of the
/// same catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub version: u64,
    pub dataset: Arc<Dataset>,
    pub index: Arc<SearchIndex>,
    pub loaded_at: DateTime<Utc>,
}

/// Owns the current catalog. Construction loads eagerly; `reload` rebuilds
/// from the resources and the live settings and swaps the whole catalog in
/// one step.
pub struct DatasetRepository {
    resources: Box<dyn ResourceSource>,
    settings: SharedSettings,
    custom_loader: CustomDatasetLoader,
    merger: DatasetMerger,
    index_builder: SearchIndexBuilder,

    current: RwLock<Arc<Catalog>>,
    next_version: AtomicU64,
    // Serializes reloads so versions are published in order
    reload_lock: Mutex<()>,
}

impl DatasetRepository {
    pub fn new(resources: Box<dyn ResourceSource>, settings: SharedSettings) -> Self {
        let custom_loader = CustomDatasetLoader::new();
        let merger = DatasetMerger::new();
        let index_builder = SearchIndexBuilder::new();

        let dataset = load_dataset(resources.as_ref(), &settings.read(), &custom_loader, &merger);
        let initial = build_catalog(0, dataset, &index_builder);

        DatasetRepository {
            resources,
            settings,
            custom_loader,
            merger,
            index_builder,
            current: RwLock::new(Arc::new(initial)),
            next_version: AtomicU64::new(1),
            reload_lock: Mutex::new(()),
        }
    }

    /// Current dataset. Never performs I/O.
    pub fn load(&self) -> Arc<Dataset> {
        self.snapshot().dataset.clone()
    }

    pub fn index(&self) -> Arc<SearchIndex> {
        self.snapshot().index.clone()
    }

    /// Current catalog; use this when dataset and index must agree.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    pub fn resources(&self) -> &dyn ResourceSource {
        self.resources.as_ref()
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Rebuild dataset and index from the resources and current settings.
    ///
    /// An unusable override is logged and ignored; the base dataset is used.
    pub fn reload(&self) -> Arc<Catalog> {
        let _guard = self.reload_lock.lock();

        let settings = self.settings.read().clone();
        let dataset = load_dataset(self.resources.as_ref(), &settings, &self.custom_loader, &self.merger);
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        let catalog = Arc::new(build_catalog(version, dataset, &self.index_builder));

        *self.current.write() = catalog.clone();
        info!(
            version,
            terms = catalog.dataset.terms.len(),
            words = catalog.dataset.words.len(),
            domains = catalog.dataset.domains.len(),
            policy = settings.merge_policy().as_str(),
            custom_only = settings.use_custom_only,
            "dataset reloaded"
        );
        catalog
    }
}

fn load_dataset(
    resources: &dyn ResourceSource,
    settings: &Settings,
    custom_loader: &CustomDatasetLoader,
    merger: &DatasetMerger,
) -> Dataset {
    let base = ResourceDatasetLoader::new(resources).load();
    let Some(json) = settings.custom_json() else {
        return base;
    };

    let custom = match custom_loader.load(json) {
        Ok(custom) => custom,
        Err(e) => {
            warn!(error = %e, "custom dataset rejected, falling back to base dataset");
            return base;
        }
    };

    if settings.use_custom_only {
        custom
    } else {
        merger.merge(&base, &custom, settings.merge_policy())
    }
}

fn build_catalog(version: u64, dataset: Dataset, builder: &SearchIndexBuilder) -> Catalog {
    let duplicates = dataset.duplicate_domain_names();
    if !duplicates.is_empty() {
        warn!(?duplicates, "dataset has duplicate domain names; lookups use the first match");
    }

    let index = builder.build(&dataset);
    Catalog {
        version,
        dataset: Arc::new(dataset),
        index: Arc::new(index),
        loaded_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::shared;
    use crate::storage::resources::{MemorySource, DOMAINS_RESOURCE, WORDS_RESOURCE};

    fn resources() -> Box<dyn ResourceSource> {
        Box::new(
            MemorySource::new()
                .with(WORDS_RESOURCE, r#"[{"koName": "등록", "abbr": "REG"}, {"koName": "일자", "abbr": "DT"}]"#)
                .with(DOMAINS_RESOURCE, r#"[{"name": "일자", "dataType": "CHAR", "length": 8}]"#),
        )
    }

    #[test]
    fn loads_eagerly_on_construction() {
        let repo = DatasetRepository::new(resources(), shared(Settings::default()));
        let catalog = repo.snapshot();
        assert_eq!(catalog.version, 0);
        assert_eq!(catalog.dataset.words.len(), 2);
        assert_eq!(catalog.index.len(), 3);
    }

    #[test]
    fn reload_merges_override_with_policy() {
        let settings = shared(Settings::default());
        let repo = DatasetRepository::new(resources(), settings.clone());

        settings.write().custom_dataset_json = Some(
            r#"{"version": "1", "words": [{"koName": "등록", "abbr": "REG", "description": "custom"}, {"koName": "고객", "abbr": "CUST"}]}"#
                .to_string(),
        );
        let catalog = repo.reload();
        assert_eq!(catalog.version, 1);
        let words = &catalog.dataset.words;
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].description.as_deref(), Some("custom"));
        assert_eq!(words[2].ko_name, "고객");
        assert!(Arc::ptr_eq(&repo.load(), &catalog.dataset));
    }

    #[test]
    fn custom_only_replaces_base() {
        let settings = shared(Settings {
            use_custom_only: true,
            custom_dataset_json: Some(r#"{"version": "1", "domains": [{"name": "코드"}]}"#.to_string()),
            ..Settings::default()
        });
        let repo = DatasetRepository::new(resources(), settings);
        let dataset = repo.load();
        assert!(dataset.words.is_empty());
        assert_eq!(dataset.domains.len(), 1);
        assert_eq!(dataset.meta.as_ref().and_then(|m| m.source.as_deref()), Some("custom"));
    }

    #[test]
    fn invalid_override_falls_back_to_base() {
        let settings = shared(Settings::default());
        let repo = DatasetRepository::new(resources(), settings.clone());
        let before = repo.load();

        for json in ["{broken", r#"{"words": []}"#, "[]"] {
            settings.write().custom_dataset_json = Some(json.to_string());
            settings.write().use_custom_only = true;
            let catalog = repo.reload();
            assert_eq!(*catalog.dataset, *before, "{json}");
        }
    }

    #[test]
    fn reload_keeps_index_consistent_with_dataset() {
        let settings = shared(Settings::default());
        let repo = DatasetRepository::new(resources(), settings.clone());
        settings.write().use_custom_only = true;
        settings.write().custom_dataset_json = Some(r#"{"version": "2", "words": [{"koName": "고객"}]}"#.to_string());

        repo.reload();
        let catalog = repo.snapshot();
        assert_eq!(catalog.index.len(), catalog.dataset.len());
        for item in &catalog.index.items {
            assert!(catalog.dataset.resolve(&item.payload).is_some(), "{:?}", item.payload);
        }
    }
}
