use askadb_core::agents::intent::{classify, DimensionRole, Intent, MeasureRole, MAX_RANK_LIMIT};
use askadb_core::dsl::compile::build_plan;
use askadb_core::schema::default_schema;
use askadb_core::sql::render::build_sql;

fn sql_for(question: &str) -> String {
    build_sql(&classify(question), &default_schema())
}

#[test]
fn top_products_by_quantity() {
    let sql = sql_for("Mostre os top 5 produtos por quantidade vendida");

    assert!(sql.contains("ORDER BY total_quantity DESC"));
    assert!(sql.ends_with("LIMIT 5"));
    insta::assert_snapshot!(sql, @r###"
    SELECT product,
           SUM(quantity) AS total_quantity
    FROM sales
    GROUP BY product
    ORDER BY total_quantity DESC
    LIMIT 5
    "###);
}

#[test]
fn month_only_sorts_by_calendar() {
    let sql = sql_for("Como as vendas evoluíram mês a mês?");

    insta::assert_snapshot!(sql, @r###"
    SELECT month,
           SUM(sales_amount) AS total_sales_amount
    FROM sales
    GROUP BY month
    ORDER BY CASE
        WHEN LOWER(month) IN ('january', 'janeiro') THEN 1
        WHEN LOWER(month) IN ('february', 'fevereiro') THEN 2
        WHEN LOWER(month) IN ('march', 'março', 'marco') THEN 3
        WHEN LOWER(month) IN ('april', 'abril') THEN 4
        WHEN LOWER(month) IN ('may', 'maio') THEN 5
        WHEN LOWER(month) IN ('june', 'junho') THEN 6
        WHEN LOWER(month) IN ('july', 'julho') THEN 7
        WHEN LOWER(month) IN ('august', 'agosto') THEN 8
        WHEN LOWER(month) IN ('september', 'setembro') THEN 9
        WHEN LOWER(month) IN ('october', 'outubro') THEN 10
        WHEN LOWER(month) IN ('november', 'novembro') THEN 11
        WHEN LOWER(month) IN ('december', 'dezembro') THEN 12
        ELSE 99
    END
    "###);
}

#[test]
fn calendar_positions_increase_through_the_year() {
    let plan = build_plan(&classify("vendas mensais"), &default_schema());
    let clause = &plan.order_by_clause;

    let months = [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december",
    ];
    let positions: Vec<usize> = months
        .iter()
        .map(|m| clause.find(&format!("'{}'", m)).expect("month listed"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!clause.starts_with("month"), "never alphabetical");
}

#[test]
fn month_with_other_dimensions_sorts_by_total() {
    let plan = build_plan(&classify("vendas por produto por mês"), &default_schema());
    assert_eq!(plan.order_by_clause, "total_sales_amount DESC");
}

#[test]
fn limit_is_bounded() {
    let intent = Intent {
        dimensions: vec![DimensionRole::Product],
        measure: MeasureRole::Amount,
        wants_ranking: true,
        rank_limit: Some(10_000),
        is_trend: false,
    };
    let plan = build_plan(&intent, &default_schema());
    assert_eq!(plan.limit, Some(MAX_RANK_LIMIT));

    let plan = build_plan(&Intent { wants_ranking: false, ..intent }, &default_schema());
    assert_eq!(plan.limit, None);
}
