//! # Features
//!
//! - `access`: shared passphrase gate
//! - `chat`: chat completion port and provider adapters
//! - `conversation`: conversation history and per-user session state
//! - `personas`: pet profiles, voices, and the system prompt compiler
//! - `speech`: text-to-speech port and ElevenLabs adapter

pub mod access;
pub mod chat;
pub mod conversation;
pub mod personas;
pub mod speech;

// Access
pub use access::AccessGate;
// Chat
pub use chat::{chat_service_from_config, ChatRequest, ChatService, Role, Turn};
// Conversation
pub use conversation::{ChatTurnOutcome, ConversationSession, Page, SessionContext, SpeechOutcome};
// Personas
pub use personas::{compile, OwnerTerm, PetProfile, ProfileForm, Species, Traits};
// Speech
pub use speech::{ElevenLabsSpeech, SpeechService};
