use tracing::debug;

use crate::agents::intent::{DimensionRole, Intent, DEFAULT_RANK_LIMIT, MAX_RANK_LIMIT};
use crate::agents::lexicon::{MONTHS, UNKNOWN_MONTH_POSITION};
use crate::dsl::plan::QueryPlan;
use crate::schema::conventions::{dimension_column, measure_column, resolve_table};
use crate::schema::descriptor::Schema;

/// Deterministic keyword fallback: turn an intent into an aggregate query plan.
///
/// Selects the dimension columns plus `SUM(measure) AS total_measure`, groups
/// by the dimensions, orders by calendar position when the month is the only
/// dimension (by the total, descending, otherwise) and limits only ranking
/// questions. No WHERE clause is ever produced.
pub fn build_plan(intent: &Intent, schema: &Schema) -> QueryPlan {
    let mut roles: Vec<DimensionRole> = Vec::with_capacity(intent.dimensions.len());
    for role in &intent.dimensions {
        if !roles.contains(role) {
            roles.push(*role);
        }
    }
    if roles.is_empty() {
        roles.push(DimensionRole::Product);
    }

    let measure = measure_column(intent.measure);
    let dimensions: Vec<&str> = roles.iter().map(|r| dimension_column(*r)).collect();
    let table = resolve_table(schema, measure, &dimensions);
    let total = format!("total_{}", measure);

    let mut select_columns: Vec<String> = dimensions.iter().map(|d| d.to_string()).collect();
    select_columns.push(format!("SUM({}) AS {}", measure, total));

    let group_by_columns: Vec<String> = dimensions.iter().map(|d| d.to_string()).collect();

    let order_by_clause = match roles.as_slice() {
        [DimensionRole::Time] => calendar_order(dimension_column(DimensionRole::Time)),
        _ => format!("{} DESC", total),
    };

    let limit = if intent.wants_ranking {
        Some(
            intent
                .rank_limit
                .unwrap_or(DEFAULT_RANK_LIMIT)
                .clamp(1, MAX_RANK_LIMIT),
        )
    } else {
        None
    };

    let plan = QueryPlan {
        table: table.to_string(),
        select_columns,
        group_by_columns,
        order_by_clause,
        limit,
    };
    debug!(table = %plan.table, dimensions = ?plan.group_by_columns, limit = ?plan.limit, "built heuristic plan");
    plan
}

/// `CASE` expression giving each month name its calendar position,
/// case-insensitively; anything else sorts last.
pub fn calendar_order(column: &str) -> String {
    let arms = MONTHS
        .iter()
        .map(|(position, names)| {
            let names = names
                .iter()
                .map(|n| format!("'{}'", n))
                .collect::<Vec<_>>()
                .join(", ");
            format!("    WHEN LOWER({}) IN ({}) THEN {}", column, names, position)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("CASE\n{}\n    ELSE {}\nEND", arms, UNKNOWN_MONTH_POSITION)
}
