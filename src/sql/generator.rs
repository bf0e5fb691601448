use crate::core::types::Domain;
use crate::sql::dialect::{DbDialect, SqlFormat};

pub const DEFAULT_TABLE_NAME: &str = "TABLE_NAME";
pub const DOMAIN_ABSENT_WARNING: &str = "no domain selected; cannot derive a column type";

const DEFAULT_TYPE: &str = "VARCHAR";
const DEFAULT_LENGTH_SUFFIX: &str = "(255)";

/// Generated SQL text plus a message for the caller to display, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlResult {
    pub sql: String,
    pub warning: Option<String>,
}

/// Renders domains as dialect-specific column types and column DDL.
///
/// Comments are escaped by doubling single quotes and nothing else; table and
/// column identifiers are emitted as given.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlGenerator;

impl SqlGenerator {
    pub fn new() -> Self {
        SqlGenerator
    }

    pub fn to_column_type(&self, domain: &Domain, dialect: DbDialect) -> String {
        let declared = domain.data_type.as_deref().unwrap_or("").to_uppercase();
        let declared = declared.trim();

        let suffix = match (domain.length, domain.scale) {
            (Some(length), Some(scale)) => format!("({length},{scale})"),
            (Some(length), None) => format!("({length})"),
            (None, _) if declared.is_empty() => DEFAULT_LENGTH_SUFFIX.to_string(),
            (None, _) => String::new(),
        };
        let base = if declared.is_empty() { DEFAULT_TYPE } else { declared };

        let name = match (base, dialect) {
            ("NUMERIC", DbDialect::Oracle) => "NUMBER",
            ("NUMERIC", DbDialect::MySql) => "DECIMAL",
            ("NUMERIC", DbDialect::Postgres) => "NUMERIC",
            ("VARCHAR" | "VARCHAR2", DbDialect::Oracle) => "VARCHAR2",
            ("VARCHAR" | "VARCHAR2", _) => "VARCHAR",
            (other, _) => other,
        };
        format!("{name}{suffix}")
    }

    /// Column DDL for `column` typed by `domain`. A missing domain yields
    /// empty SQL and a warning instead of an error.
    pub fn generate_column_sql(
        &self,
        column: &str,
        domain: Option<&Domain>,
        description: Option<&str>,
        dialect: DbDialect,
        format: SqlFormat,
        table: Option<&str>,
    ) -> SqlResult {
        let Some(domain) = domain else {
            return SqlResult { sql: String::new(), warning: Some(DOMAIN_ABSENT_WARNING.to_string()) };
        };

        let table = table.unwrap_or(DEFAULT_TABLE_NAME);
        let comment = description.map(str::trim).unwrap_or("");
        let column_type = self.to_column_type(domain, dialect);

        let definition = if dialect.inline_comments() && !comment.is_empty() {
            format!("{column} {column_type} COMMENT '{}'", escape_sql(comment))
        } else {
            format!("{column} {column_type}")
        };

        let comment_sql = (!dialect.inline_comments() && !comment.is_empty())
            .then(|| comment_statement(table, column, comment));

        let sql = match (format, comment_sql) {
            (SqlFormat::ColumnDefinition, None) => definition,
            (SqlFormat::ColumnDefinition, Some(stmt)) => format!("{definition};\n{stmt}"),
            (SqlFormat::CreateTable, None) => create_table(table, &[definition]),
            (SqlFormat::CreateTable, Some(stmt)) => format!("{}\n{stmt}", create_table(table, &[definition])),
        };
        SqlResult { sql, warning: None }
    }
}

pub fn escape_sql(text: &str) -> String {
    text.replace('\'', "''")
}

pub(crate) fn comment_statement(table: &str, column: &str, comment: &str) -> String {
    format!("COMMENT ON COLUMN {table}.{column} IS '{}';", escape_sql(comment))
}

pub(crate) fn create_table(table: &str, definitions: &[String]) -> String {
    format!("CREATE TABLE {table} (\n  {}\n);", definitions.join(",\n  "))
}
