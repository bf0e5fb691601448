use std::io::{Seek, Write};
use std::sync::Arc;
use tracing::{debug, info};
use crate::builder::name_builder::NameBuilder;
use crate::core::config::{shared, Config, Settings, SharedSettings};
use crate::core::error::Result;
use crate::core::types::{Domain, Entity, Word};
use crate::index::entry::{SearchItem, TypeFilter};
use crate::search::engine::{SearchEngine, SearchQuery};
use crate::sql::column::{default_domain, ColumnEntry, ColumnStage};
use crate::storage::export::DatasetExporter;
use crate::storage::repository::{Catalog, DatasetRepository};
use crate::storage::resources::ResourceSource;

/// One user's working state: the live settings, the catalog, the search
/// engine, the name builder and the staged columns.
///
/// Search results handed out by `search` carry payload references into the
/// catalog current at the time of the call. The selection helpers only resolve
/// an item while that catalog is still current.
pub struct Session {
    settings: SharedSettings,
    repository: Arc<DatasetRepository>,
    engine: SearchEngine,
    builder: NameBuilder,
    columns: ColumnStage,
    exporter: DatasetExporter,
}

impl Session {
    pub fn new(resources: Box<dyn ResourceSource>, settings: Settings, config: Config) -> Self {
        let builder = NameBuilder::new(settings.case_style());
        let settings = shared(settings);
        let repository = Arc::new(DatasetRepository::new(resources, settings.clone()));

        Session {
            settings,
            repository,
            engine: SearchEngine::new(config),
            builder,
            columns: ColumnStage::new(),
            exporter: DatasetExporter::new(),
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn repository(&self) -> &Arc<DatasetRepository> {
        &self.repository
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn builder(&self) -> &NameBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut NameBuilder {
        &mut self.builder
    }

    pub fn columns(&self) -> &ColumnStage {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut ColumnStage {
        &mut self.columns
    }

    /// Search the current catalog with the default limit and the fuzzy
    /// setting.
    pub fn search(&self, text: &str, types: Option<TypeFilter>) -> Vec<SearchItem> {
        let mut query = SearchQuery::new(text, self.engine.config().default_limit);
        query.types = types;
        self.search_with(&query)
    }

    pub fn search_with(&self, query: &SearchQuery) -> Vec<SearchItem> {
        let fuzzy = self.settings.read().enable_fuzzy;
        let catalog = self.repository.snapshot();
        self.engine.search(&catalog, query, fuzzy)
    }

    /// Replace the settings and bring dependent state in line: reload when the
    /// dataset inputs changed, re-render staged columns when the dialect
    /// changed, adopt a new default case style. Returns whether a reload ran.
    pub fn apply_settings(&mut self, next: Settings) -> bool {
        let previous = std::mem::replace(&mut *self.settings.write(), next.clone());

        let reloaded = previous.dataset_inputs_differ(&next);
        if reloaded {
            self.repository.reload();
        }

        if reloaded || previous.dialect() != next.dialect() {
            let dataset = self.repository.load();
            self.columns.rebuild_for_dialect(&dataset, next.dialect());
        }

        if previous.case_style() != next.case_style() {
            self.builder.set_case_style(next.case_style());
        }

        info!(
            reloaded,
            dialect = next.dialect().as_str(),
            case_style = next.case_style().as_str(),
            "settings applied"
        );
        reloaded
    }

    /// Append the word behind `item` to the builder. Words are added as-is,
    /// terms as a plain word; domains and items from an older catalog are
    /// ignored.
    pub fn add_item_to_builder(&mut self, item: &SearchItem) -> bool {
        let Some(catalog) = self.catalog_for(item) else {
            return false;
        };
        let word = match catalog.dataset.resolve(&item.payload) {
            Some(Entity::Word(word)) => word.clone(),
            Some(Entity::Term(term)) => Word::from(term),
            Some(Entity::Domain(_)) | None => {
                debug!(payload = ?item.payload, "search item not added to builder");
                return false;
            }
        };
        self.builder.add(word);
        true
    }

    /// Domain for a new builder column: the explicitly selected domain, else
    /// the selected search item's domain, else the default domain.
    pub fn domain_for_builder(&self, selected: Option<&str>, item: Option<&SearchItem>) -> Domain {
        let catalog = self.repository.snapshot();
        let dataset = &catalog.dataset;
        if let Some(domain) = dataset.find_domain_by_name(selected) {
            return domain.clone();
        }

        let from_item = item
            .filter(|item| is_current(&catalog, item))
            .and_then(|item| dataset.resolve(&item.payload))
            .and_then(|entity| match entity {
                Entity::Domain(domain) => Some(domain),
                Entity::Term(term) => dataset.find_domain_by_name(term.domain_name.as_deref()),
                Entity::Word(_) => None,
            });
        from_item.cloned().unwrap_or_else(default_domain)
    }

    /// Current catalog, if `item` was produced by it.
    fn catalog_for(&self, item: &SearchItem) -> Option<Arc<Catalog>> {
        let catalog = self.repository.snapshot();
        is_current(&catalog, item).then_some(catalog)
    }

    /// Stage a column for the builder's current name. `None` when the builder
    /// is empty.
    pub fn add_builder_column(&mut self, selected: Option<&str>, item: Option<&SearchItem>) -> Option<&ColumnEntry> {
        let domain = self.domain_for_builder(selected, item);
        let dialect = self.settings.read().dialect();
        let entry = self.columns.entry_from_builder(&self.builder, &domain, dialect)?;
        self.columns.add(entry);
        self.columns.entries().last()
    }

    pub fn column_output(&self) -> String {
        self.columns.column_output()
    }

    pub fn create_table_sql(&self, table: Option<&str>) -> String {
        self.columns.create_table_sql(self.settings.read().dialect(), table)
    }

    /// Zip of the base dataset resources as shipped.
    pub fn export_base<W: Write + Seek>(&self, writer: W) -> Result<W> {
        self.exporter.write_base_zip(self.repository.resources(), writer)
    }

    /// Zip of the dataset currently in use.
    pub fn export_merged<W: Write + Seek>(&self, writer: W) -> Result<W> {
        self.exporter.write_merged_zip(&self.repository.load(), writer)
    }
}

fn is_current(catalog: &Catalog, item: &SearchItem) -> bool {
    if item.catalog_version == catalog.version {
        return true;
    }
    debug!(
        payload = ?item.payload,
        item_version = item.catalog_version,
        current = catalog.version,
        "search item is from an older catalog"
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::case_style::CaseStyle;
    use crate::index::entry::SearchItemType;
    use crate::storage::resources::{MemorySource, DOMAINS_RESOURCE, TERMS_RESOURCE, WORDS_RESOURCE};

    fn resources() -> Box<dyn ResourceSource> {
        Box::new(
            MemorySource::new()
                .with(TERMS_RESOURCE, r#"[{"koName": "주문금액", "abbr": "ORD_AMT", "domainName": "금액"}]"#)
                .with(WORDS_RESOURCE, r#"[{"koName": "주문", "abbr": "ORD"}, {"koName": "일자", "abbr": "DT"}]"#)
                .with(DOMAINS_RESOURCE, r#"[
                    {"name": "금액", "dataType": "NUMERIC", "length": 15, "scale": 2},
                    {"name": "일자", "dataType": "CHAR", "length": 8}
                ]"#),
        )
    }

    fn session() -> Session {
        Session::new(resources(), Settings::default(), Config::default())
    }

    fn first_of(session: &Session, text: &str, item_type: SearchItemType) -> SearchItem {
        session.search(text, Some(TypeFilter::only(item_type)))
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn builds_column_from_search_selections() {
        let mut session = session();
        let word = first_of(&session, "주문", SearchItemType::Word);
        let date = first_of(&session, "dt", SearchItemType::Word);
        assert!(session.add_item_to_builder(&word));
        assert!(session.add_item_to_builder(&date));
        assert_eq!(session.builder().build_name(), "ORD_DT");

        let domain = first_of(&session, "일자", SearchItemType::Domain);
        assert!(!session.add_item_to_builder(&domain));

        let entry = session.add_builder_column(None, Some(&domain)).unwrap().clone();
        assert_eq!(entry.definition, "ORD_DT CHAR(8)");
        assert_eq!(
            session.create_table_sql(None),
            "CREATE TABLE TABLE_NAME (\n  ORD_DT CHAR(8)\n);\nCOMMENT ON COLUMN TABLE_NAME.ORD_DT IS '주문 일자';"
        );
    }

    #[test]
    fn term_selection_adds_word_and_implies_domain() {
        let mut session = session();
        let term = first_of(&session, "주문금액", SearchItemType::Term);
        assert!(session.add_item_to_builder(&term));
        assert_eq!(session.builder().tokens()[0].abbr.as_deref(), Some("ORD_AMT"));
        assert!(!session.builder().tokens()[0].is_form_word);

        assert_eq!(session.domain_for_builder(None, Some(&term)).name, "금액");
        assert_eq!(session.domain_for_builder(Some(" 일자 "), Some(&term)).name, "일자");
        assert_eq!(session.domain_for_builder(Some("없음"), None).name, "기본V255");
    }

    #[test]
    fn empty_builder_stages_nothing() {
        let mut session = session();
        assert!(session.add_builder_column(None, None).is_none());
        assert!(session.columns().is_empty());
    }

    #[test]
    fn dialect_change_rerenders_columns_without_reload() {
        let mut session = session();
        let word = first_of(&session, "ord", SearchItemType::Word);
        session.add_item_to_builder(&word);
        session.add_builder_column(Some("금액"), None);
        assert_eq!(session.column_output(), "ORD NUMERIC(15,2)\nCOMMENT ON COLUMN TABLE_NAME.ORD IS '주문';");

        let version = session.repository().snapshot().version;
        let reloaded = session.apply_settings(Settings { db_dialect: "oracle".to_string(), ..session.settings() });
        assert!(!reloaded);
        assert_eq!(session.repository().snapshot().version, version);
        assert_eq!(session.columns().entries()[0].definition, "ORD NUMBER(15,2)");
    }

    #[test]
    fn override_change_reloads_and_case_style_follows_default() {
        let mut session = session();
        session.builder_mut().add(Word::new("고객").with_abbr("CUST"));

        let next = Settings {
            custom_dataset_json: Some(r#"{"version": "1", "words": [{"koName": "고객", "abbr": "CUST"}]}"#.to_string()),
            default_case_style: CaseStyle::Camel.as_str().to_string(),
            ..session.settings()
        };
        assert!(session.apply_settings(next));
        assert_eq!(session.builder().build_name(), "cust");
        assert_eq!(session.search("cust", None).len(), 1);
        assert_eq!(session.repository().snapshot().version, 1);
    }

    #[test]
    fn items_from_a_replaced_catalog_are_not_resolved() {
        let mut session = session();
        let word = first_of(&session, "주문", SearchItemType::Word);
        let term = first_of(&session, "주문금액", SearchItemType::Term);

        let next = Settings {
            custom_dataset_json: Some(r#"{"version": "1", "words": [{"koName": "가", "abbr": "A1"}]}"#.to_string()),
            use_custom_only: true,
            ..session.settings()
        };
        assert!(session.apply_settings(next));

        assert!(!session.add_item_to_builder(&word));
        assert!(session.builder().tokens().is_empty());
        assert_eq!(session.domain_for_builder(None, Some(&term)).name, "기본V255");

        let fresh = first_of(&session, "가", SearchItemType::Word);
        assert!(session.add_item_to_builder(&fresh));
        assert_eq!(session.builder().build_name(), "A1");
    }

    #[test]
    fn exports_merged_dataset() {
        let session = session();
        let buffer = session.export_merged(std::io::Cursor::new(Vec::new())).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(buffer.into_inner())).unwrap();
        assert_eq!(archive.len(), 3);
        assert!(session.export_base(std::io::Cursor::new(Vec::new())).is_ok());
    }
}
