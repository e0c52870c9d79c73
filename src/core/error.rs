//! Error types
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Split form, configuration, chat and speech failures into typed errors

use thiserror::Error;

/// A form submission that cannot become a pet profile.
///
/// Every offending field is collected so the form can report them all at once.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Please fix these fields (missing or out of range): {}", .fields.join(", "))]
pub struct ValidationError {
    pub fields: Vec<String>,
}

impl ValidationError {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// Startup configuration problems. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure talking to the chat completion provider.
#[derive(Debug, Error)]
pub enum ChatServiceError {
    #[error("Chat service rejected the credentials: {0}")]
    Auth(String),

    #[error("Chat service rate limit reached: {0}")]
    RateLimited(String),

    #[error("Chat service unreachable: {0}")]
    Network(String),

    #[error("Chat service timed out after {0} seconds")]
    Timeout(u64),

    #[error("Chat service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Chat service returned no text")]
    EmptyReply,
}

/// Failure talking to the speech synthesis provider.
///
/// Callers treat this as a warning and fall back to text.
#[derive(Debug, Error)]
pub enum SpeechServiceError {
    #[error("Speech service rejected the credentials: {0}")]
    Auth(String),

    #[error("Speech service rate limit reached: {0}")]
    RateLimited(String),

    #[error("Speech service unreachable: {0}")]
    Network(String),

    #[error("Speech service timed out after {0} seconds")]
    Timeout(u64),

    #[error("Speech service error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Errors raised by session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No pet has been created yet")]
    NoActivePet,

    #[error(transparent)]
    Chat(#[from] ChatServiceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError::new(vec!["name".into(), "dislikes".into()]);
        assert_eq!(
            err.to_string(),
            "Please fix these fields (missing or out of range): name, dislikes"
        );
        assert!(err.contains("name"));
        assert!(!err.contains("favorites"));
    }

    #[test]
    fn test_validation_error_covers_range_errors() {
        let err = ValidationError::new(vec!["age".into(), "traits.anxiety".into(), "voice".into()]);
        let message = err.to_string();
        assert!(message.contains("out of range"));
        assert!(message.ends_with("age, traits.anxiety, voice"));
        assert!(!message.contains("required"));
    }

    #[test]
    fn test_session_error_wraps_chat_error() {
        let err: SessionError = ChatServiceError::Timeout(45).into();
        assert!(matches!(err, SessionError::Chat(ChatServiceError::Timeout(45))));
        assert_eq!(err.to_string(), "Chat service timed out after 45 seconds");
    }
}
