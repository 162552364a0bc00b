use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use shopscout_core::config::{LlmConfig, LlmProvider};

/// Pluggable chat-completion seam. Implementations are latency-bearing and
/// fallible; callers must treat every completion as best-effort.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

const SYSTEM_MESSAGE: &str = "You are a concise, fast assistant. Keep answers short and focused.";
const TEMPERATURE: f64 = 0.2;
const MAX_TOKENS: u32 = 300;

/// Client for OpenAI-compatible chat-completions endpoints (OpenAI itself,
/// or an Ollama server's `/v1` surface). Retries transport failures up to
/// the configured bound.
pub struct HttpLlmClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_retries: u32,
}

impl HttpLlmClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let base_url = match (&config.base_url, config.provider) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, LlmProvider::OpenAi) => "https://api.openai.com/v1".to_string(),
            (None, LlmProvider::Ollama) => {
                return Err(anyhow!("llm.base_url is required for the ollama provider"));
            }
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building llm http client")?;

        Ok(Self {
            http,
            endpoint: format!("{base_url}/chat/completions"),
            api_key: config.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    async fn send_once(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_MESSAGE.to_string() },
                ChatMessage { role: "user", content: prompt.to_string() },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.context("llm request failed")?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("llm endpoint returned {status}: {detail}"));
        }

        let parsed: ChatResponse =
            response.json().await.context("llm response was not valid json")?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("llm response contained no choices"))
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut last_error = None;
        for _attempt in 0..=self.max_retries {
            match self.send_once(prompt).await {
                Ok(content) => return Ok(content),
                Err(error) => last_error = Some(error),
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow!("llm request never attempted")))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use shopscout_core::config::AppConfig;

    use super::*;

    #[test]
    fn openai_provider_defaults_to_public_endpoint() {
        let mut config = AppConfig::default().llm;
        config.provider = LlmProvider::OpenAi;
        config.base_url = None;
        config.api_key = Some("sk-test".to_string().into());

        let client = HttpLlmClient::from_config(&config).expect("client builds");
        assert_eq!(client.endpoint, "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let mut config = AppConfig::default().llm;
        config.base_url = Some("http://localhost:11434/v1/".to_string());

        let client = HttpLlmClient::from_config(&config).expect("client builds");
        assert_eq!(client.endpoint, "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn ollama_without_base_url_is_rejected() {
        let mut config = AppConfig::default().llm;
        config.provider = LlmProvider::Ollama;
        config.base_url = None;

        assert!(HttpLlmClient::from_config(&config).is_err());
    }
}
