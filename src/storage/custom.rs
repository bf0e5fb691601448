use serde_json::Value;
use crate::core::error::{Error, Result};
use crate::core::types::{Dataset, DatasetMeta};
use crate::storage::parser::DatasetParser;

pub const CUSTOM_SOURCE: &str = "custom";

/// Turns user-supplied override JSON into a dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomDatasetLoader {
    parser: DatasetParser,
}

impl CustomDatasetLoader {
    pub fn new() -> Self {
        CustomDatasetLoader::default()
    }

    /// Fails with `InvalidDataset` when the text is not JSON, the root is not
    /// an object, or `version` is blank. A document without `meta` gets one
    /// built from its version.
    pub fn load(&self, json: &str) -> Result<Dataset> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| Error::invalid_dataset(format!("JSON parse error: {e}")))?;
        let (version, mut dataset) = self.parser.parse_document(&root)?;

        if dataset.meta.is_none() {
            dataset.meta = Some(DatasetMeta {
                dataset_version: Some(version),
                source: Some(CUSTOM_SOURCE.to_string()),
                generated_at: None,
                counts: None,
            });
        }
        Ok(dataset)
    }
}
