//! # Speech Feature
//!
//! Text-to-speech for pet replies. Failures here never end a conversation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: true

pub mod elevenlabs;

pub use elevenlabs::ElevenLabsSpeech;

use crate::core::SpeechServiceError;
use async_trait::async_trait;

/// A speech synthesis backend. Returns encoded audio (MP3) ready for playback.
#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechServiceError>;
}

pub(crate) fn speech_error_for_status(status: u16, message: String) -> SpeechServiceError {
    match status {
        401 | 403 => SpeechServiceError::Auth(message),
        429 => SpeechServiceError::RateLimited(message),
        _ => SpeechServiceError::Api { status, message },
    }
}
