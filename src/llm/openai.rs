// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tokio::time::sleep;

use crate::config::GeneratorConfig;
use crate::error::Fallible;
use crate::llm::GenerationError;
use crate::llm::Generator;
use crate::llm::prompt::SYSTEM_PROMPT;
use crate::llm::prompt::cards_prompt;
use crate::llm::prompt::questions_prompt;
use crate::llm::response::parse_cards;
use crate::llm::response::parse_questions;
use crate::types::question::Question;

const RETRY_DELAY_MS: u64 = 1000;

/// A [`Generator`] backed by an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiGenerator {
    config: GeneratorConfig,
    client: Client,
    retry_delay: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(config: GeneratorConfig) -> Fallible<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            client,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    /// Send one prompt, retrying transient failures with linear backoff.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, GenerationError> {
        let model = if model.trim().is_empty() {
            self.config.model.as_str()
        } else {
            model
        };
        let mut attempt: u32 = 0;
        loop {
            match self.request(prompt, model).await {
                Ok(content) => return Ok(content),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "Attempt {attempt}/{} failed: {e}",
                        self.config.max_retries + 1
                    );
                    sleep(self.retry_delay * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request(&self, prompt: &str, model: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;
        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                code: status.as_u16(),
                body,
            });
        }
        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;
        let content: String = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        log::debug!("Raw response: {content}");
        Ok(content.to_string())
    }
}

impl Generator for OpenAiGenerator {
    fn cards(
        &self,
        chunk: &str,
        preferences: &str,
        model: &str,
    ) -> impl Future<Output = Result<Vec<String>, GenerationError>> + Send {
        async move {
            let prompt = cards_prompt(chunk, preferences);
            let raw = self.complete(&prompt, model).await?;
            parse_cards(&raw)
        }
    }

    fn questions(
        &self,
        chunk: &str,
        preferences: &str,
        model: &str,
    ) -> impl Future<Output = Result<Vec<Question>, GenerationError>> + Send {
        async move {
            let prompt = questions_prompt(chunk, preferences);
            let raw = self.complete(&prompt, model).await?;
            parse_questions(&raw)
        }
    }
}
