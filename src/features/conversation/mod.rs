//! # Conversation Feature
//!
//! The conversation history with a pet and the per-user session that owns it.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Chat page input parsing; blank lines are skipped
//! - 1.1.0: Session context replaces shared mutable state
//! - 1.0.0: Initial release

pub mod commands;
pub mod context;
pub mod session;

#[cfg(test)]
pub(crate) mod fakes;

pub use commands::ChatCommand;
pub use context::{ChatTurnOutcome, Page, SessionContext, SpeechOutcome};
pub use session::{greeting_message, ConversationSession};
