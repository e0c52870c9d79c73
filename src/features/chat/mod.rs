//! # Chat Feature
//!
//! The chat completion port the pet speaks through, with Anthropic and OpenAI adapters.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Requests carry the conversation id for log correlation
//! - 1.1.0: Add OpenAI adapter
//! - 1.0.0: Initial release with Anthropic Messages API

pub mod anthropic;
pub mod openai_chat;

pub use anthropic::AnthropicChat;
pub use openai_chat::OpenAiChat;

use crate::core::{ChatProvider, ChatServiceError, Config};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Replies are capped at this many tokens
pub const MAX_REPLY_TOKENS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

/// One role-tagged message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a provider needs to produce the next assistant turn
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    /// Conversation the request belongs to; adapters prefix their logs with it
    pub session_id: Uuid,
    pub system_prompt: &'a str,
    pub turns: &'a [Turn],
    pub max_tokens: u32,
}

impl<'a> ChatRequest<'a> {
    pub fn new(session_id: Uuid, system_prompt: &'a str, turns: &'a [Turn]) -> Self {
        Self {
            session_id,
            system_prompt,
            turns,
            max_tokens: MAX_REPLY_TOKENS,
        }
    }
}

/// A chat completion backend. Returns exactly one assistant reply.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatServiceError>;
}

/// Build the chat adapter selected by configuration
pub fn chat_service_from_config(config: &Config) -> Box<dyn ChatService> {
    match config.chat_provider {
        ChatProvider::Anthropic => Box::new(AnthropicChat::new(
            config.chat_api_key.clone(),
            config.chat_model.clone(),
            config.request_timeout,
        )),
        ChatProvider::OpenAi => Box::new(OpenAiChat::new(
            config.chat_model.clone(),
            config.request_timeout,
        )),
    }
}

/// Map an HTTP failure status onto the chat error kinds
pub(crate) fn chat_error_for_status(status: u16, message: String) -> ChatServiceError {
    match status {
        401 | 403 => ChatServiceError::Auth(message),
        429 => ChatServiceError::RateLimited(message),
        _ => ChatServiceError::Api { status, message },
    }
}
