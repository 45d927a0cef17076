use async_trait::async_trait;

use crate::error::ModelError;

/// The external language model, reduced to one operation: prompt in, SQL text out.
///
/// Implementations own transport, credentials and any retry policy; the
/// translator calls `generate` at most once per question.
#[async_trait]
pub trait SqlGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    fn name(&self) -> &str {
        "model"
    }
}
