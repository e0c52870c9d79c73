// Core layer - configuration and error types
pub mod core;

// Features layer - all feature modules
pub mod features;

pub use core::Config;

pub use features::{
    // Access
    AccessGate,
    // Chat
    chat_service_from_config, ChatService,
    // Conversation
    ChatTurnOutcome, ConversationSession, SessionContext, SpeechOutcome,
    // Personas
    compile, PetProfile, ProfileForm,
    // Speech
    ElevenLabsSpeech, SpeechService,
};
