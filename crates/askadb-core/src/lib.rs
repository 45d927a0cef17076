//! Natural-language analytics questions to SQL.
//!
//! Keyword heuristics classify the question and build an aggregate query;
//! an optional language model is tried first and its output is checked
//! before use.

pub mod agents;
pub mod dsl;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod schema;
pub mod sql;
pub mod translate;
pub mod validate;

pub use error::{ModelError, SchemaError};
pub use llm::SqlGenerator;
pub use prompt::compose::FewShotExample;
pub use schema::Schema;
pub use translate::{TranslationResult, Translator, TranslatorConfig};
