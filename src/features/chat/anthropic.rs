//! Anthropic Messages API adapter
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Log lines carry the conversation id
//! - 1.0.0: Initial release

use super::{chat_error_for_status, ChatRequest, ChatService, Turn};
use crate::core::ChatServiceError;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Claude-backed chat service
#[derive(Clone)]
pub struct AnthropicChat {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl AnthropicChat {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            timeout,
        }
    }

    fn body<'a>(&'a self, request: &'a ChatRequest<'a>) -> MessagesBody<'a> {
        MessagesBody {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: request.system_prompt,
            messages: request.turns,
        }
    }
}

/// First text block of a Messages API response
fn first_text(response: MessagesResponse) -> Result<String, ChatServiceError> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ChatServiceError::EmptyReply)
}

/// Pull the human-readable message out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl ChatService for AnthropicChat {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatServiceError> {
        debug!(
            "[{}] Sending {} turns to Anthropic ({})",
            request.session_id,
            request.turns.len(),
            self.model
        );

        let resp = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .timeout(self.timeout)
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatServiceError::Timeout(self.timeout.as_secs())
                } else {
                    ChatServiceError::Network(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(&body);
            error!("[{}] Anthropic API error {status}: {message}", request.session_id);
            return Err(chat_error_for_status(status.as_u16(), message));
        }

        let parsed: MessagesResponse = resp
            .json()
            .await
            .map_err(|e| ChatServiceError::Network(format!("Unreadable response: {e}")))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "[{}] Anthropic usage: {} input / {} output tokens",
                request.session_id, usage.input_tokens, usage.output_tokens
            );
        }

        first_text(parsed).map(|text| text.trim().to_string())
    }
}
