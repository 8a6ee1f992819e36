//! Executor backed by any OpenAI-compatible `/chat/completions` endpoint
//! (Gemini's OpenAI surface, OpenRouter, OpenAI, local servers).

use super::output::AgentOutput;
use super::traits::{AgentHandle, Executor};
use crate::activity::TaskSpec;
use crate::config::ProviderConfig;
use crate::http_client::{build_client_with_timeout, summarize_error_body};
use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub struct ChatCompletionsExecutor {
    name: String,
    api_key: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    chat_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsExecutor {
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let base_url = config.base_url.trim_end_matches('/');
        let chat_url = if base_url.ends_with("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };

        Ok(Self {
            name: config.name.clone(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            chat_url,
            model: config.model.clone(),
            temperature: config.temperature,
            client: build_client_with_timeout(Duration::from_secs(config.timeout_secs))?,
        })
    }

    fn user_message(task: &TaskSpec) -> String {
        if task.expected_output.trim().is_empty() {
            return task.description.clone();
        }
        format!(
            "{}\n\nExpected output: {}",
            task.description, task.expected_output
        )
    }

    async fn complete(&self, task: &TaskSpec, agent: &AgentHandle) -> anyhow::Result<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            anyhow::bail!(
                "{} API key not set. Set provider.api_key or GEMINI_API_KEY.",
                self.name
            );
        };

        let user_message = Self::user_message(task);
        let request = ChatRequest {
            model: agent.model.as_deref().unwrap_or(&self.model),
            messages: vec![
                Message {
                    role: "system",
                    content: &agent.system_prompt,
                },
                Message {
                    role: "user",
                    content: &user_message,
                },
            ],
            temperature: agent.temperature.unwrap_or(self.temperature),
        };

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("{} chat completions request failed", self.name))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} API error ({status}): {}",
                self.name,
                summarize_error_body(&body)
            );
        }

        let chat: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("{} chat completions JSON decode failed", self.name))?;

        chat.choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow::anyhow!("No response from {}", self.name))
    }
}

impl Executor for ChatCompletionsExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute<'a>(
        &'a self,
        task: &'a TaskSpec,
        agent: &'a AgentHandle,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<AgentOutput>> + Send + 'a>> {
        Box::pin(async move {
            let text = self.complete(task, agent).await?;
            tracing::debug!(
                executor = self.name.as_str(),
                persona = agent.persona_id.as_str(),
                chars = text.len(),
                "persona reply generated"
            );
            Ok(AgentOutput::Text(text))
        })
    }
}
