use async_trait::async_trait;
use eve_core::LLMProvider;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::retry::{RetryPolicy, retry_with_backoff};

pub const ZHIPU_DEFAULT_MODEL: &str = "glm-4-flash";

/// OpenAI-style chat completions endpoint, used with a single user turn.
pub struct ZhipuProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl ZhipuProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating ZhipuProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://open.bigmodel.cn/api/paas/v4".to_string(),
            model: ZHIPU_DEFAULT_MODEL.to_string(),
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

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [ { "role": "user", "content": prompt } ],
        })
    }

    fn extract_text(response: &Value) -> anyhow::Result<String> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
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
impl LLMProvider for ZhipuProvider {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let request = self.request_body(prompt);

        info!("Sending request to Zhipu API: model={}", self.model);
        let text = retry_with_backoff(|| self.try_send(&request), &self.retry).await?;
        info!("Received response from Zhipu API");

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
