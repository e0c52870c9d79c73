//! OpenAI chat completions adapter
//!
//! The `openai` crate reads its key from `OPENAI_KEY`, so the binary exports
//! the configured key before the first request.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.1.0
//!
//! ## Changelog
//! - 1.1.0: Log lines carry the conversation id
//! - 1.0.0: Initial release

use super::{ChatRequest, ChatService, Role, Turn};
use crate::core::ChatServiceError;
use async_trait::async_trait;
use log::{debug, error};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone)]
pub struct OpenAiChat {
    model: String,
    timeout: Duration,
}

impl OpenAiChat {
    pub fn new(model: String, timeout: Duration) -> Self {
        Self { model, timeout }
    }
}

fn message(role: ChatCompletionMessageRole, content: &str) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Some(content.to_string()),
        name: None,
        function_call: None,
        tool_call_id: None,
        tool_calls: None,
    }
}

/// System prompt first, then the conversation in order
fn build_messages(system_prompt: &str, turns: &[Turn]) -> Vec<ChatCompletionMessage> {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(message(ChatCompletionMessageRole::System, system_prompt));
    for turn in turns {
        let role = match turn.role {
            Role::User => ChatCompletionMessageRole::User,
            Role::Assistant => ChatCompletionMessageRole::Assistant,
        };
        messages.push(message(role, &turn.content));
    }
    messages
}

/// The crate folds every API failure into one error type; sort it by its message
fn classify(message: String) -> ChatServiceError {
    let lower = message.to_lowercase();
    if lower.contains("api key") || lower.contains("invalid_api_key") || lower.contains("unauthorized") {
        ChatServiceError::Auth(message)
    } else if lower.contains("rate limit") || lower.contains("quota") {
        ChatServiceError::RateLimited(message)
    } else {
        ChatServiceError::Network(message)
    }
}

#[async_trait]
impl ChatService for OpenAiChat {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatServiceError> {
        let messages = build_messages(request.system_prompt, request.turns);
        debug!(
            "[{}] Sending {} messages to OpenAI ({})",
            request.session_id,
            messages.len(),
            self.model
        );

        let completion = timeout(
            self.timeout,
            ChatCompletion::builder(&self.model, messages)
                .max_tokens(u64::from(request.max_tokens))
                .create(),
        )
        .await
        .map_err(|_| ChatServiceError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| {
            error!("[{}] OpenAI API error: {e}", request.session_id);
            classify(e.to_string())
        })?;

        if let Some(usage) = &completion.usage {
            debug!(
                "[{}] OpenAI usage: {} prompt / {} completion tokens",
                request.session_id, usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(ChatServiceError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_messages_prepends_system() {
        let turns = vec![Turn::user("hi"), Turn::assistant("HELLO!")];
        let messages = build_messages("You are Luna", &turns);

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0].role, ChatCompletionMessageRole::System));
        assert_eq!(messages[0].content.as_deref(), Some("You are Luna"));
        assert!(matches!(messages[1].role, ChatCompletionMessageRole::User));
        assert!(matches!(messages[2].role, ChatCompletionMessageRole::Assistant));
        assert_eq!(messages[2].content.as_deref(), Some("HELLO!"));
    }

    #[test]
    fn test_classify_errors() {
        assert!(matches!(
            classify("Incorrect API key provided".to_string()),
            ChatServiceError::Auth(_)
        ));
        assert!(matches!(
            classify("Rate limit reached for gpt-4o".to_string()),
            ChatServiceError::RateLimited(_)
        ));
        assert!(matches!(
            classify("connection reset".to_string()),
            ChatServiceError::Network(_)
        ));
    }
}
