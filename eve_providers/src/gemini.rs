use async_trait::async_trait;
use eve_core::LLMProvider;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::retry::{RetryPolicy, retry_with_backoff};

pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating GeminiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: GEMINI_DEFAULT_MODEL.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        })
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: &Value) -> anyhow::Result<String> {
        let parts = response["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing candidate parts"))?;

        Ok(parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect::<String>())
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Self::extract_text(&response)
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = Self::request_body(prompt);

        info!("Sending request to Gemini API: model={}", self.model);
        let text = retry_with_backoff(|| self.try_send(&request), &self.retry).await?;
        info!("Received response from Gemini API");

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
