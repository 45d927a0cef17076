use anyhow::Context;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::ddl;
use crate::schema::descriptor::{ColumnDescriptor, ColumnType, Schema};

/// Reads a schema file (JSON or DDL).
pub fn load_schema_file(path: &str) -> anyhow::Result<Schema> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read schema file: {}", path))?;
    let schema = parse_schema_text(&raw).with_context(|| format!("parse schema file: {}", path))?;
    Ok(schema)
}

/// Accepts the schema the way callers send it: a JSON object of tables or
/// `CREATE TABLE` statements.
pub fn parse_schema_text(text: &str) -> Result<Schema, SchemaError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::NoTables);
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return schema_from_value(&value);
    }

    ddl::from_create_tables(trimmed)
}

/// Lenient JSON reading: missing fields become empty strings (type `TEXT`),
/// entries that are not objects are skipped.
///
/// Tables are either a list of columns or an object with a `columns` list.
pub fn schema_from_value(value: &Value) -> Result<Schema, SchemaError> {
    let tables = value
        .as_object()
        .ok_or_else(|| SchemaError::NotAnObject(json_kind(value)))?;

    let mut schema = Schema::new();
    for (name, table) in tables {
        let entries: &[Value] = match table {
            Value::Array(cols) => cols.as_slice(),
            Value::Object(obj) => obj
                .get("columns")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        let columns = entries.iter().filter_map(column_from_value).collect();
        schema = schema.with_table(name.clone(), columns);
    }

    if schema.is_empty() {
        return Err(SchemaError::NoTables);
    }
    Ok(schema)
}

fn column_from_value(value: &Value) -> Option<ColumnDescriptor> {
    let obj = value.as_object()?;
    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Some(ColumnDescriptor::new(
        text("name"),
        ColumnType::from_sql_name(&text("type")),
        text("description"),
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
