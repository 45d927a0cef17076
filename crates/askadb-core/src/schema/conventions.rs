use crate::agents::intent::{DimensionRole, MeasureRole};
use crate::schema::descriptor::{Schema, DEFAULT_TABLE};

/// Concrete column behind an abstract dimension role.
pub fn dimension_column(role: DimensionRole) -> &'static str {
    match role {
        DimensionRole::Time => "month",
        DimensionRole::Product => "product",
        DimensionRole::Region => "region",
    }
}

/// Concrete column behind an abstract measure role.
pub fn measure_column(role: MeasureRole) -> &'static str {
    match role {
        MeasureRole::Amount => "sales_amount",
        MeasureRole::Count => "quantity",
    }
}

/// Picks the table the heuristic query reads from.
///
/// Column names always follow the conventions above; only the table name is
/// taken from the caller's schema, and only when one of its tables actually
/// carries the measure column.
pub fn resolve_table<'a>(schema: &'a Schema, measure: &str, dimensions: &[&str]) -> &'a str {
    // 1. A table with the measure and every dimension
    if let Some((name, _)) = schema
        .tables
        .iter()
        .find(|(_, t)| t.has_column(measure) && dimensions.iter().all(|d| t.has_column(d)))
    {
        return name.as_str();
    }

    // 2. Any table with the measure
    if let Some((name, _)) = schema.tables.iter().find(|(_, t)| t.has_column(measure)) {
        return name.as_str();
    }

    // Unrecognized shape
    DEFAULT_TABLE
}
