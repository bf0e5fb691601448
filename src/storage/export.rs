use std::io::{Seek, Write};
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Dataset;
use crate::storage::resources::{ResourceSource, DOMAINS_RESOURCE, TERMS_RESOURCE, WORDS_RESOURCE};

/// Entries written by both archive kinds, in archive order.
pub const EXPORT_FILES: [&str; 3] = [TERMS_RESOURCE, WORDS_RESOURCE, DOMAINS_RESOURCE];

/// Writes datasets as zip archives of `terms.json`, `words.json`, `domains.json`.
pub struct DatasetExporter {
    options: SimpleFileOptions,
}

impl Default for DatasetExporter {
    fn default() -> Self {
        DatasetExporter {
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
        }
    }
}

impl DatasetExporter {
    pub fn new() -> Self {
        DatasetExporter::default()
    }

    /// Archive the base resources byte-for-byte. Returns the finished writer.
    pub fn write_base_zip<W: Write + Seek>(&self, source: &dyn ResourceSource, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        for name in EXPORT_FILES {
            let bytes = source.read(name).ok_or_else(|| Error::new(
                ErrorKind::ResourceMissing,
                format!("dataset resource not found: {name}"),
            ))?;
            self.write_entry(&mut zip, name, &bytes)?;
        }
        Ok(zip.finish()?)
    }

    /// Archive the in-memory entities as pretty-printed JSON.
    pub fn write_merged_zip<W: Write + Seek>(&self, dataset: &Dataset, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        self.write_json(&mut zip, TERMS_RESOURCE, &dataset.terms)?;
        self.write_json(&mut zip, WORDS_RESOURCE, &dataset.words)?;
        self.write_json(&mut zip, DOMAINS_RESOURCE, &dataset.domains)?;
        Ok(zip.finish()?)
    }

    fn write_json<W: Write + Seek, T: Serialize>(&self, zip: &mut ZipWriter<W>, name: &str, items: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(items)?;
        self.write_entry(zip, name, &bytes)
    }

    fn write_entry<W: Write + Seek>(&self, zip: &mut ZipWriter<W>, name: &str, bytes: &[u8]) -> Result<()> {
        zip.start_file(name, self.options)?;
        zip.write_all(bytes)?;
        Ok(())
    }
}
