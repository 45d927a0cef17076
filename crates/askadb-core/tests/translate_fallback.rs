use std::sync::{Arc, Mutex};
use std::time::Duration;

use askadb_core::translate::{heuristic_sql, MODEL_CONFIDENCE};
use askadb_core::{FewShotExample, ModelError, SqlGenerator, Translator, TranslatorConfig};
use async_trait::async_trait;

mod common;
use crate::common::{retail_schema, QUESTIONS};

struct FixedSql(&'static str);

#[async_trait]
impl SqlGenerator for FixedSql {
    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Ok(self.0.to_string())
    }
}

struct Failing;

#[async_trait]
impl SqlGenerator for Failing {
    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        Err(ModelError::CallFailed(
            "401 Unauthorized: invalid key sk-live-0123456789".to_string(),
        ))
    }
}

struct Slow;

#[async_trait]
impl SqlGenerator for Slow {
    async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok("SELECT 1".to_string())
    }
}

#[derive(Default)]
struct Recording {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl SqlGenerator for Recording {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("SELECT region, SUM(sales_amount) FROM orders GROUP BY region".to_string())
    }
}

fn with_model(generator: impl SqlGenerator + 'static) -> Translator {
    let generator: Arc<dyn SqlGenerator> = Arc::new(generator);
    Translator::new(Some(generator), TranslatorConfig::default())
}

#[tokio::test]
async fn no_model_uses_heuristic_at_point_seven() {
    let translator = Translator::heuristic_only();
    let result = translator.translate("asdf", None, None).await;

    assert_eq!(result.confidence, 0.7);
    assert_eq!(result.query, heuristic_sql("asdf", None));
    assert!(!result.query.contains("LIMIT"));
    assert!(result.query.contains("GROUP BY product"));
    assert!(result.explanation.contains("No language model"));
}

#[tokio::test]
async fn failing_model_uses_heuristic_at_point_six() {
    let question = "Mostre os top 5 produtos por quantidade vendida";
    let result = with_model(Failing).translate(question, None, None).await;

    assert_eq!(result.confidence, 0.6);
    assert_eq!(result.query, heuristic_sql(question, None));
    assert!(result.explanation.contains("401 Unauthorized"));
    assert!(!result.explanation.contains("sk-live-0123456789"));
}

#[tokio::test]
async fn model_answer_is_cleaned_and_kept() {
    let result = with_model(FixedSql(
        "```sql\nSELECT product, SUM(quantity) FROM sales GROUP BY product;\n```",
    ))
    .translate("top produtos", None, None)
    .await;

    assert_eq!(result.confidence, MODEL_CONFIDENCE);
    assert_eq!(result.query, "SELECT product, SUM(quantity) FROM sales GROUP BY product");
}

#[tokio::test]
async fn prose_answer_falls_back() {
    let result = with_model(FixedSql("Desculpe, não consigo responder."))
        .translate("vendas por região", None, None)
        .await;

    assert_eq!(result.confidence, 0.6);
    assert_eq!(result.query, heuristic_sql("vendas por região", None));
    assert!(result.explanation.contains("unusable SQL"));
}

#[tokio::test]
async fn write_statement_falls_back() {
    let result = with_model(FixedSql("DROP TABLE sales"))
        .translate("vendas por região", None, None)
        .await;

    assert_eq!(result.confidence, 0.6);
    assert!(result.query.starts_with("SELECT"));
}

#[tokio::test]
async fn non_select_queries_fall_back() {
    for reply in [
        "VALUES (1)",
        "SELECT region INTO stolen FROM sales",
        "(SELECT 1)",
        "WITH t AS (SELECT 1) SELECT * FROM t",
    ] {
        let result = with_model(FixedSql(reply))
            .translate("vendas por região", None, None)
            .await;

        assert_eq!(result.confidence, 0.6, "reply: {reply:?}");
        assert_eq!(result.query, heuristic_sql("vendas por região", None));
    }
}

#[tokio::test]
async fn labelled_fenced_reply_is_accepted() {
    let result = with_model(FixedSql("SQL: ```sql\nSELECT region FROM sales\n```"))
        .translate("vendas por região", None, None)
        .await;

    assert_eq!(result.confidence, 0.95);
    assert_eq!(result.query, "SELECT region FROM sales");
}

#[tokio::test]
async fn slow_model_times_out() {
    let translator = Translator::new(
        Some(Arc::new(Slow) as Arc<dyn SqlGenerator>),
        TranslatorConfig {
            model_timeout: Duration::from_millis(20),
        },
    );
    let result = translator.translate("vendas mensais", None, None).await;

    assert_eq!(result.confidence, 0.6);
    assert!(result.explanation.contains("timed out"));
    assert_eq!(result.query, heuristic_sql("vendas mensais", None));
}

#[tokio::test]
async fn prompt_carries_schema_examples_and_question() {
    let recording = Arc::new(Recording::default());
    let translator = Translator::new(
        Some(recording.clone() as Arc<dyn SqlGenerator>),
        TranslatorConfig::default(),
    );
    let schema = retail_schema();
    let examples = vec![FewShotExample {
        question: "clientes por região".to_string(),
        sql: "SELECT region, COUNT(*) FROM customers GROUP BY region".to_string(),
    }];

    let result = translator
        .translate("vendas por região", Some(&schema), Some(examples.as_slice()))
        .await;
    assert_eq!(result.confidence, MODEL_CONFIDENCE);

    let prompts = recording.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1, "single attempt per question");
    let prompt = &prompts[0];
    assert!(prompt.contains("Table: orders"));
    assert!(prompt.contains("SQL: SELECT region, COUNT(*) FROM customers GROUP BY region"));
    assert!(prompt.contains("Question: vendas por região"));
}

#[tokio::test]
async fn suggestions_do_not_depend_on_sql_path() {
    let question = "Quero vendas por região no mês de maio";
    let heuristic = Translator::heuristic_only().translate(question, None, None).await;
    let modeled = with_model(FixedSql("SELECT 1")).translate(question, None, None).await;

    assert_eq!(heuristic.visualizations, modeled.visualizations);
    assert_eq!(heuristic.follow_ups, modeled.follow_ups);
}

#[tokio::test]
async fn every_result_is_a_select() {
    let failing = with_model(Failing);
    let none = Translator::heuristic_only();
    let schema = retail_schema();

    for q in QUESTIONS {
        for result in [
            none.translate(q, None, None).await,
            failing.translate(q, Some(&schema), None).await,
        ] {
            assert!(!result.query.is_empty());
            assert!(result.query.to_uppercase().starts_with("SELECT"), "question: {q:?}");
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }
}

#[tokio::test]
async fn result_uses_response_field_names() {
    let result = Translator::heuristic_only()
        .translate("sales by region", None, None)
        .await;
    let json = serde_json::to_value(&result).unwrap();

    assert!(json.get("query").is_some());
    assert!(json.get("confidence").is_some());
    assert!(json.get("explanation").is_some());
    assert!(json["suggested_visualizations"].is_array());
    assert!(json["suggested_follow_up_questions"].is_array());
}
