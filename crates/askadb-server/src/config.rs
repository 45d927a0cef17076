use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` when no API key is set; the service then answers from the heuristic only.
    pub openai: Option<OpenAiConfig>,
    pub model_timeout: Duration,
    /// Schema used when a request carries none (JSON or DDL file).
    pub schema_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a port number")?;

        let model_timeout = parse_model_timeout(std::env::var("MODEL_TIMEOUT_SECONDS").ok().as_deref())?;

        let openai = non_empty_var("OPENAI_API_KEY").map(|api_key| OpenAiConfig {
            api_key,
            model: non_empty_var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            base_url: non_empty_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: std::env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|t| t.parse::<f32>().ok())
                .unwrap_or(0.2),
        });

        Ok(Self {
            host,
            port,
            openai,
            model_timeout,
            schema_path: non_empty_var("ASKADB_SCHEMA_PATH"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Seconds allowed for one model call; unset means 30.
fn parse_model_timeout(raw: Option<&str>) -> anyhow::Result<Duration> {
    let secs = raw
        .unwrap_or("30")
        .trim()
        .parse::<u64>()
        .context("MODEL_TIMEOUT_SECONDS must be a whole number of seconds")?;
    anyhow::ensure!(secs > 0, "MODEL_TIMEOUT_SECONDS must be greater than zero");
    Ok(Duration::from_secs(secs))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
