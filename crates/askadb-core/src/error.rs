use std::time::Duration;

use thiserror::Error;

/// Why the language model path did not produce a query.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no language model configured")]
    Unavailable,

    #[error("model call failed: {0}")]
    CallFailed(String),

    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model returned unusable SQL: {0}")]
    Malformed(String),
}

impl ModelError {
    /// Confidence attached to a heuristic result produced because of this error.
    pub fn fallback_confidence(&self) -> f64 {
        match self {
            ModelError::Unavailable => 0.7,
            _ => 0.6,
        }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema JSON must be an object of tables, found {0}")]
    NotAnObject(&'static str),

    #[error("schema DDL could not be parsed: {0}")]
    Ddl(String),

    #[error("schema declares no tables")]
    NoTables,
}

/// Rejections from the static check on model output.
#[derive(Debug, Error)]
pub enum SqlCheckError {
    #[error("empty output")]
    Empty,

    #[error("parse error: {0}")]
    Parse(String),

    #[error("expected exactly one statement, found {0}")]
    StatementCount(usize),

    #[error("only SELECT queries are allowed")]
    NotAQuery,
}

impl From<SqlCheckError> for ModelError {
    fn from(e: SqlCheckError) -> Self {
        ModelError::Malformed(e.to_string())
    }
}
