use crate::builder::name_builder::NameBuilder;
use crate::core::types::{Dataset, Domain};
use crate::sql::dialect::{DbDialect, SqlFormat};
use crate::sql::generator::{comment_statement, create_table, SqlGenerator, DEFAULT_TABLE_NAME};

pub const DEFAULT_DOMAIN_NAME: &str = "기본V255";

/// Domain used when a column has no resolvable domain.
pub fn default_domain() -> Domain {
    Domain::new(DEFAULT_DOMAIN_NAME).with_type("VARCHAR", Some(255), None)
}

/// A staged output column.
///
/// `domain_name` and `description` are kept so the entry can be re-rendered
/// for another dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub name: String,
    pub definition: String,
    pub comment_sql: Option<String>,
    pub domain_name: Option<String>,
    pub description: Option<String>,
}

/// Ordered list of staged columns.
#[derive(Debug, Default, Clone)]
pub struct ColumnStage {
    entries: Vec<ColumnEntry>,
    generator: SqlGenerator,
}

impl ColumnStage {
    pub fn new() -> Self {
        ColumnStage::default()
    }

    pub fn entries(&self) -> &[ColumnEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: ColumnEntry) {
        self.entries.push(entry);
    }

    pub fn remove(&mut self, index: usize) -> Option<ColumnEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn move_entry(&mut self, from: usize, to: usize) {
        let len = self.entries.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render a column for the builder's current name, commented with the
    /// tokens' local names. `None` when the builder has no name.
    pub fn entry_from_builder(&self, builder: &NameBuilder, domain: &Domain, dialect: DbDialect) -> Option<ColumnEntry> {
        let name = builder.build_name();
        if name.trim().is_empty() {
            return None;
        }
        Some(self.render(name, domain, Some(builder.comment()), dialect))
    }

    /// Re-render every entry for `dialect`, resolving domains by name against
    /// `dataset`.
    pub fn rebuild_for_dialect(&mut self, dataset: &Dataset, dialect: DbDialect) {
        let entries = std::mem::take(&mut self.entries);
        let rebuilt: Vec<ColumnEntry> = entries.into_iter()
            .map(|entry| {
                let domain = dataset
                    .find_domain_by_name(entry.domain_name.as_deref())
                    .cloned()
                    .unwrap_or_else(default_domain);
                self.render(entry.name, &domain, entry.description, dialect)
            })
            .collect();
        self.entries = rebuilt;
    }

    /// Definitions and comment statements, one per line.
    pub fn column_output(&self) -> String {
        self.entries.iter()
            .flat_map(|entry| std::iter::once(entry.definition.as_str()).chain(entry.comment_sql.as_deref()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One `CREATE TABLE` for all staged columns, followed by their comment
    /// statements unless the dialect comments inline. Empty when nothing is staged.
    pub fn create_table_sql(&self, dialect: DbDialect, table: Option<&str>) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let table = table.unwrap_or(DEFAULT_TABLE_NAME);
        let definitions: Vec<String> = self.entries.iter().map(|e| e.definition.clone()).collect();
        let create = create_table(table, &definitions);
        if dialect.inline_comments() {
            return create;
        }

        // Staged comments name the default table; restate them for `table`.
        let comments: Vec<String> = self.entries.iter()
            .filter(|e| e.comment_sql.is_some())
            .filter_map(|e| {
                let description = e.description.as_deref()?.trim();
                Some(comment_statement(table, &e.name, description))
            })
            .collect();
        if comments.is_empty() {
            create
        } else {
            format!("{create}\n{}", comments.join("\n"))
        }
    }

    fn render(&self, name: String, domain: &Domain, description: Option<String>, dialect: DbDialect) -> ColumnEntry {
        let result = self.generator.generate_column_sql(
            &name,
            Some(domain),
            description.as_deref(),
            dialect,
            SqlFormat::ColumnDefinition,
            None,
        );
        let (definition, comment_sql) = split_column_sql(&result.sql);
        ColumnEntry {
            name,
            definition,
            comment_sql,
            domain_name: Some(domain.name.clone()),
            description,
        }
    }
}

/// First line without its trailing `;`, and the remaining lines if non-blank.
fn split_column_sql(sql: &str) -> (String, Option<String>) {
    let (first, rest) = sql.split_once('\n').unwrap_or((sql, ""));
    let definition = first.trim();
    let definition = definition.strip_suffix(';').unwrap_or(definition).to_string();
    let rest = rest.trim();
    (definition, (!rest.is_empty()).then(|| rest.to_string()))
}
