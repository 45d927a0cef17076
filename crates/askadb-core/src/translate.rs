use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::agents::intent::classify;
use crate::agents::suggest::{suggest, Visualization};
use crate::error::ModelError;
use crate::llm::SqlGenerator;
use crate::prompt::compose::{compose, FewShotExample};
use crate::schema::descriptor::{describe, Schema};
use crate::sql::render::build_sql;
use crate::validate::static_check::{check_select, clean_model_output};

/// Confidence of a query the model produced and the static check accepted.
pub const MODEL_CONFIDENCE: f64 = 0.95;

const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REASON_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub query: String,
    pub confidence: f64,
    pub explanation: String,
    #[serde(rename = "suggested_visualizations")]
    pub visualizations: Vec<Visualization>,
    #[serde(rename = "suggested_follow_up_questions")]
    pub follow_ups: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Upper bound for the single model call; hitting it counts as a failure.
    pub model_timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }
}

/// Turns questions into SQL: the model when one is configured and answers
/// with a usable query, the keyword heuristic otherwise.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct Translator {
    generator: Option<Arc<dyn SqlGenerator>>,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(generator: Option<Arc<dyn SqlGenerator>>, config: TranslatorConfig) -> Self {
        Self { generator, config }
    }

    /// Translator without a model; every answer comes from the heuristic.
    pub fn heuristic_only() -> Self {
        Self::new(None, TranslatorConfig::default())
    }

    /// Never fails: model problems degrade to the heuristic with lower confidence.
    pub async fn translate(
        &self,
        question: &str,
        schema: Option<&Schema>,
        examples: Option<&[FewShotExample]>,
    ) -> TranslationResult {
        let schema = Schema::resolve(schema);
        let suggestions = suggest(question);

        let (query, confidence, explanation) = match self
            .generate_with_model(question, &schema, examples.unwrap_or_default())
            .await
        {
            Ok(sql) => {
                info!("query generated by language model");
                (
                    sql,
                    MODEL_CONFIDENCE,
                    "Query generated by the language model and checked to be a single SELECT."
                        .to_string(),
                )
            }
            Err(ModelError::Unavailable) => {
                info!("no language model configured, using keyword heuristic");
                (
                    build_sql(&classify(question), &schema),
                    ModelError::Unavailable.fallback_confidence(),
                    "No language model is configured; the query was built from keywords in the question."
                        .to_string(),
                )
            }
            Err(err) => {
                let reason = redact(&err.to_string());
                warn!(%reason, "language model path failed, using keyword heuristic");
                (
                    build_sql(&classify(question), &schema),
                    err.fallback_confidence(),
                    format!(
                        "The language model could not be used ({}); the query was built from keywords in the question.",
                        reason
                    ),
                )
            }
        };

        TranslationResult {
            query,
            confidence,
            explanation,
            visualizations: suggestions.visualizations,
            follow_ups: suggestions.follow_ups,
        }
    }

    async fn generate_with_model(
        &self,
        question: &str,
        schema: &Schema,
        examples: &[FewShotExample],
    ) -> Result<String, ModelError> {
        let generator = self.generator.as_ref().ok_or(ModelError::Unavailable)?;

        let prompt = compose(question, &describe(Some(schema)), examples);
        let raw = tokio::time::timeout(self.config.model_timeout, generator.generate(&prompt))
            .await
            .map_err(|_| ModelError::Timeout(self.config.model_timeout))??;

        let sql = clean_model_output(&raw);
        check_select(&sql)?;
        Ok(sql)
    }
}

/// The heuristic answer for a question, as the fallback path computes it.
pub fn heuristic_sql(question: &str, schema: Option<&Schema>) -> String {
    build_sql(&classify(question), &Schema::resolve(schema))
}

// Failure text ends up in responses: mask key-like words and cap the length.
fn redact(reason: &str) -> String {
    let masked = reason
        .split_whitespace()
        .map(|w| if looks_like_secret(w) { "[redacted]" } else { w })
        .collect::<Vec<_>>()
        .join(" ");

    if masked.chars().count() <= MAX_REASON_CHARS {
        return masked;
    }
    let mut capped: String = masked.chars().take(MAX_REASON_CHARS).collect();
    capped.push_str("...");
    capped
}

fn looks_like_secret(word: &str) -> bool {
    let w = word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'));
    if w.starts_with("sk-") {
        return true;
    }
    w.len() >= 32
        && w.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && w.chars().any(|c| c.is_ascii_digit())
        && w.chars().any(|c| c.is_ascii_alphabetic())
}
