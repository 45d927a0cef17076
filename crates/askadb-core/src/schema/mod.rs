pub mod conventions;
pub mod ddl;
pub mod descriptor;
pub mod registry;

pub use descriptor::{default_schema, describe, ColumnDescriptor, ColumnType, Schema, TableDescriptor};
pub use registry::{load_schema_file, parse_schema_text, schema_from_value};
