use sqlparser::ast::{SetExpr, Statement};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

use crate::error::SqlCheckError;

/// Strips what models like to wrap around SQL: markdown fences, a leading
/// `SQL:` label, a trailing semicolon.
pub fn clean_model_output(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("SQL:").unwrap_or(trimmed).trim_start();
    let inner = trimmed
        .strip_prefix("```sql")
        .or_else(|| trimmed.strip_prefix("```SQL"))
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let inner = inner.strip_suffix("```").unwrap_or(inner).trim();
    let inner = inner.strip_prefix("SQL:").unwrap_or(inner).trim();

    inner.trim_end_matches(';').trim_end().to_string()
}

/// Parse check: exactly one statement, a plain `SELECT` that writes nothing.
///
/// `WITH`, `VALUES`, set operations, parenthesised queries and
/// `SELECT ... INTO` are all rejected as `NotAQuery`.
pub fn check_select(sql: &str) -> Result<(), SqlCheckError> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(SqlCheckError::Empty);
    }

    let dialect = PostgreSqlDialect {};
    let statements =
        Parser::parse_sql(&dialect, sql).map_err(|e| SqlCheckError::Parse(e.to_string()))?;

    let query = match statements.as_slice() {
        [Statement::Query(query)] => query,
        [_] => return Err(SqlCheckError::NotAQuery),
        other => return Err(SqlCheckError::StatementCount(other.len())),
    };

    let plain_select = match query.body.as_ref() {
        SetExpr::Select(select) => query.with.is_none() && select.into.is_none(),
        _ => false,
    };
    if !plain_select || !starts_with_select(trimmed) {
        return Err(SqlCheckError::NotAQuery);
    }
    Ok(())
}

fn starts_with_select(sql: &str) -> bool {
    sql.get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("select"))
}
