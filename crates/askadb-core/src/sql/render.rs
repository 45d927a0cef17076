use crate::agents::intent::Intent;
use crate::dsl::compile::build_plan;
use crate::dsl::plan::QueryPlan;
use crate::schema::descriptor::Schema;

fn render_sql_inner(plan: &QueryPlan) -> String {
    let select_clause = format!("SELECT {}", plan.select_columns.join(",\n       "));

    let from_clause = format!("FROM {}", plan.table);

    // GROUP BY
    let group_by_clause = if plan.group_by_columns.is_empty() {
        "".to_string()
    } else {
        format!("\nGROUP BY {}", plan.group_by_columns.join(", "))
    };

    // ORDER BY
    let order_by_clause = format!("\nORDER BY {}", plan.order_by_clause);

    // LIMIT
    let limit_clause = plan
        .limit
        .map(|n| format!("\nLIMIT {}", n))
        .unwrap_or_default();

    format!(
        "{select}\n{from}{group_by}{order_by}{limit}",
        select = select_clause,
        from = from_clause,
        group_by = group_by_clause,
        order_by = order_by_clause,
        limit = limit_clause,
    )
}

/// Render a plan as SQL. Clauses go on separate lines, no trailing semicolon.
pub fn render_sql(plan: &QueryPlan) -> String {
    render_sql_inner(plan)
}

/// Heuristic query for an intent against a schema.
pub fn build_sql(intent: &Intent, schema: &Schema) -> String {
    render_sql(&build_plan(intent, schema))
}
