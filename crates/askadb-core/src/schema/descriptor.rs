use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Table used by the built-in schema and by the heuristic fallback.
pub const DEFAULT_TABLE: &str = "sales";

/// Ordered table name -> table descriptor mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub tables: IndexMap<String, TableDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableDescriptor {
    pub columns: Vec<ColumnDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub description: String,
}

/// Column type as declared by the caller. Unknown names are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Integer,
    #[default]
    Text,
    Real,
    Datetime,
    Other(String),
}

impl ColumnType {
    /// Maps a SQL type name (`VARCHAR(20)`, `double precision`, `timestamptz`...)
    /// onto the canonical set. Empty input means `TEXT`.
    pub fn from_sql_name(raw: &str) -> Self {
        let trimmed = raw.trim();
        let upper = trimmed.to_ascii_uppercase();
        let base = upper
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default();

        match base {
            "" | "TEXT" | "VARCHAR" | "CHAR" | "CHARACTER" | "NVARCHAR" | "STRING" => ColumnType::Text,
            "INT" | "INTEGER" | "BIGINT" | "SMALLINT" | "TINYINT" | "INT2" | "INT4" | "INT8"
            | "SERIAL" | "BIGSERIAL" => ColumnType::Integer,
            "REAL" | "FLOAT" | "FLOAT4" | "FLOAT8" | "DOUBLE" | "DECIMAL" | "NUMERIC" => ColumnType::Real,
            "DATE" | "DATETIME" | "TIMESTAMP" | "TIMESTAMPTZ" | "TIME" => ColumnType::Datetime,
            _ => ColumnType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Real => "REAL",
            ColumnType::Datetime => "DATETIME",
            ColumnType::Other(raw) => raw,
        }
    }
}

impl From<String> for ColumnType {
    fn from(raw: String) -> Self {
        ColumnType::from_sql_name(&raw)
    }
}

impl From<ColumnType> for String {
    fn from(ty: ColumnType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type,
            description: description.into(),
        }
    }
}

impl TableDescriptor {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Appends a column unless one with the same name is already present.
    pub fn push_column(&mut self, column: ColumnDescriptor) -> bool {
        if self.has_column(&column.name) {
            return false;
        }
        self.columns.push(column);
        true
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by tests and by the default schema.
    pub fn with_table(mut self, name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        let table = self.tables.entry(name.into()).or_default();
        for column in columns {
            table.push_column(column);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.get(name)
    }

    /// The schema to work with: the caller's one, or the built-in default when
    /// none was supplied or it carries no tables.
    pub fn resolve(schema: Option<&Schema>) -> Cow<'_, Schema> {
        match schema {
            Some(s) if !s.is_empty() => Cow::Borrowed(s),
            _ => Cow::Owned(default_schema()),
        }
    }
}

/// Single `sales` table the service was originally built around.
pub fn default_schema() -> Schema {
    Schema::new().with_table(
        DEFAULT_TABLE,
        vec![
            ColumnDescriptor::new("id", ColumnType::Integer, "Unique sale identifier"),
            ColumnDescriptor::new("region", ColumnType::Text, "Sales region (Norte, Sul, Sudeste, ...)"),
            ColumnDescriptor::new("product", ColumnType::Text, "Product name"),
            ColumnDescriptor::new("month", ColumnType::Text, "Month of the sale, spelled out (e.g. 'janeiro')"),
            ColumnDescriptor::new("sales_amount", ColumnType::Real, "Total sale value"),
            ColumnDescriptor::new("quantity", ColumnType::Integer, "Units sold"),
            ColumnDescriptor::new("created_at", ColumnType::Datetime, "Record creation timestamp"),
        ],
    )
}

/// Human readable listing of every table and column, in insertion order.
/// Used verbatim inside the model prompt.
pub fn describe(schema: Option<&Schema>) -> String {
    let schema = Schema::resolve(schema);

    schema
        .tables
        .iter()
        .map(|(name, table)| {
            let mut block = format!("Table: {}", name);
            for col in &table.columns {
                if col.description.is_empty() {
                    block.push_str(&format!("\n- {} ({})", col.name, col.column_type));
                } else {
                    block.push_str(&format!("\n- {} ({}): {}", col.name, col.column_type, col.description));
                }
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
