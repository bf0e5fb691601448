use std::fmt;

/// Target database for generated DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DbDialect {
    #[default]
    Postgres,
    Oracle,
    MySql,
}

impl DbDialect {
    pub const ALL: [DbDialect; 3] = [DbDialect::Postgres, DbDialect::Oracle, DbDialect::MySql];

    /// Case-insensitive; anything unrecognized is `Postgres`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "oracle" => DbDialect::Oracle,
            "mysql" => DbDialect::MySql,
            _ => DbDialect::Postgres,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DbDialect::Postgres => "Postgres",
            DbDialect::Oracle => "Oracle",
            DbDialect::MySql => "MySQL",
        }
    }

    /// MySQL carries column comments inline instead of as a separate statement.
    pub fn inline_comments(&self) -> bool {
        matches!(self, DbDialect::MySql)
    }
}

impl fmt::Display for DbDialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlFormat {
    #[default]
    ColumnDefinition,
    CreateTable,
}
