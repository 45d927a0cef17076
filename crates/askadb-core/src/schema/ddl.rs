use sqlparser::ast::{ColumnOption, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::error::SchemaError;
use crate::schema::descriptor::{ColumnDescriptor, ColumnType, Schema};

/// Builds a schema out of one or more `CREATE TABLE` statements.
/// Other statements in the text are ignored.
pub fn from_create_tables(sql: &str) -> Result<Schema, SchemaError> {
    let statements =
        Parser::parse_sql(&GenericDialect {}, sql).map_err(|e| SchemaError::Ddl(e.to_string()))?;

    let mut schema = Schema::new();
    for stmt in statements {
        let Statement::CreateTable(create) = stmt else {
            continue;
        };

        let columns = create
            .columns
            .iter()
            .map(|col| {
                // COMMENT 'text' doubles as the description
                let description = col
                    .options
                    .iter()
                    .find_map(|o| match &o.option {
                        ColumnOption::Comment(c) => Some(c.clone()),
                        _ => None,
                    })
                    .unwrap_or_default();

                ColumnDescriptor::new(
                    col.name.value.clone(),
                    ColumnType::from_sql_name(&col.data_type.to_string()),
                    description,
                )
            })
            .collect();

        schema = schema.with_table(create.name.to_string(), columns);
    }

    if schema.is_empty() {
        return Err(SchemaError::NoTables);
    }
    Ok(schema)
}
