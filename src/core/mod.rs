//! # Core Module
//!
//! Configuration and error types shared by every feature.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add typed errors for chat, speech and session failures
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;

// Re-export commonly used items
pub use config::{ChatProvider, Config};
pub use error::{ChatServiceError, ConfigError, SessionError, SpeechServiceError, ValidationError};
