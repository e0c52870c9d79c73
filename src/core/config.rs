//! Environment configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add OpenAI as an alternative chat provider
//! - 1.0.0: Initial release with Anthropic and ElevenLabs credentials

use super::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Which backend answers as the pet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatProvider {
    Anthropic,
    OpenAi,
}

impl ChatProvider {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Some(ChatProvider::Anthropic),
            "openai" => Some(ChatProvider::OpenAi),
            _ => None,
        }
    }

    fn key_var(&self) -> &'static str {
        match self {
            ChatProvider::Anthropic => "ANTHROPIC_API_KEY",
            ChatProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ChatProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            ChatProvider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub chat_provider: ChatProvider,
    pub chat_api_key: String,
    pub chat_model: String,
    pub elevenlabs_api_key: String,
    /// Shared passphrase guarding the app. `None` leaves it open.
    pub password: Option<String>,
    pub audio_dir: PathBuf,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let chat_provider = match get("ARGOS_CHAT_PROVIDER") {
            Some(raw) => ChatProvider::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                name: "ARGOS_CHAT_PROVIDER".to_string(),
                reason: format!("unknown provider '{raw}' (expected anthropic or openai)"),
            })?,
            None => ChatProvider::Anthropic,
        };

        let chat_api_key = get(chat_provider.key_var())
            .ok_or_else(|| ConfigError::MissingVar(chat_provider.key_var().to_string()))?;
        let elevenlabs_api_key = get("ELEVENLABS_API_KEY")
            .ok_or_else(|| ConfigError::MissingVar("ELEVENLABS_API_KEY".to_string()))?;

        let chat_model =
            get("ARGOS_CHAT_MODEL").unwrap_or_else(|| chat_provider.default_model().to_string());

        let timeout_secs = match get("ARGOS_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "ARGOS_REQUEST_TIMEOUT_SECS".to_string(),
                    reason: format!("'{raw}' is not a positive number of seconds"),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            chat_provider,
            chat_api_key,
            chat_model,
            elevenlabs_api_key,
            password: get("ARGOS_PASSWORD"),
            audio_dir: PathBuf::from(get("ARGOS_AUDIO_DIR").unwrap_or_else(|| "audio".to_string())),
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
