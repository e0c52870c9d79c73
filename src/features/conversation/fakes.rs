//! In-memory chat and speech services for tests

use crate::core::{ChatServiceError, SpeechServiceError};
use crate::features::chat::{ChatRequest, ChatService, Turn};
use crate::features::speech::SpeechService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Owned copy of a request the fake received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub session_id: Uuid,
    pub system_prompt: String,
    pub turns: Vec<Turn>,
    pub max_tokens: u32,
}

/// Replies from a script in order; fails once the script runs out
pub struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedChat {
    pub fn replying(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::replying(&[])
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for ScriptedChat {
    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, ChatServiceError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            session_id: request.session_id,
            system_prompt: request.system_prompt.to_string(),
            turns: request.turns.to_vec(),
            max_tokens: request.max_tokens,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ChatServiceError::RateLimited("script exhausted".to_string()))
    }
}

/// Records every synthesis call; optionally fails all of them
pub struct RecordingSpeech {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingSpeech {
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (text, voice_id) pairs in call order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechService for RecordingSpeech {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice_id.to_string()));
        if self.fail {
            Err(SpeechServiceError::Api {
                status: 402,
                message: "quota exceeded".to_string(),
            })
        } else {
            Ok(format!("mp3:{text}").into_bytes())
        }
    }
}
