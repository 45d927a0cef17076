mod config;
mod openai;

use std::sync::Arc;

use anyhow::Context;
use askadb_core::schema::{load_schema_file, parse_schema_text, schema_from_value};
use askadb_core::{FewShotExample, Schema, SqlGenerator, TranslationResult, Translator, TranslatorConfig};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::openai::OpenAiClient;

#[derive(Debug, Deserialize)]
struct TranslateRequest {
    user_input: String,
    /// JSON object of tables, or a string holding JSON or CREATE TABLE DDL.
    #[serde(default)]
    table_schema: Option<Value>,
    #[serde(default)]
    examples: Option<Vec<FewShotExample>>,
}

#[derive(Clone)]
struct AppState {
    translator: Arc<Translator>,
    default_schema: Option<Arc<Schema>>,
}

async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Json<TranslationResult> {
    let schema = request_schema(req.table_schema.as_ref())
        .or_else(|| state.default_schema.as_deref().cloned());

    let result = state
        .translator
        .translate(&req.user_input, schema.as_ref(), req.examples.as_deref())
        .await;

    Json(result)
}

/// Schema carried by a request. Unusable input is logged and ignored.
fn request_schema(raw: Option<&Value>) -> Option<Schema> {
    let parsed = match raw? {
        Value::Null => return None,
        Value::String(text) if text.trim().is_empty() => return None,
        Value::String(text) => parse_schema_text(text),
        other => schema_from_value(other),
    };

    match parsed {
        Ok(schema) => Some(schema),
        Err(e) => {
            tracing::warn!(error = %e, "unusable table_schema, using default schema");
            None
        }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .route("/translate/", post(translate))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    let generator: Option<Arc<dyn SqlGenerator>> = config
        .openai
        .clone()
        .map(|c| Arc::new(OpenAiClient::new(c)) as Arc<dyn SqlGenerator>);
    match &generator {
        Some(g) => tracing::info!(model = g.name(), "language model enabled"),
        None => tracing::warn!("OPENAI_API_KEY not set, answering from keyword heuristic only"),
    }

    let default_schema = match &config.schema_path {
        Some(path) => Some(Arc::new(load_schema_file(path)?)),
        None => None,
    };

    let translator = Translator::new(
        generator,
        TranslatorConfig {
            model_timeout: config.model_timeout,
        },
    );
    let app = router(AppState {
        translator: Arc::new(translator),
        default_schema,
    });

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("bind {}", bind_addr))?;
    tracing::info!("Server running on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
