use serde::Serialize;

// The aggregate query the heuristic builder produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    pub table: String,                 // e.g. "sales"
    pub select_columns: Vec<String>,   // dimensions, then "SUM(x) AS total_x"
    pub group_by_columns: Vec<String>, // the dimensions only
    pub order_by_clause: String,       // never empty
    pub limit: Option<u32>,
}
