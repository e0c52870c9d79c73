//! ElevenLabs text-to-speech provider
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Synthesis logging moved to the caller, which knows the conversation
//! - 1.0.0: Initial release

use super::{speech_error_for_status, SpeechService};
use crate::core::SpeechServiceError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TTS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Serialize)]
struct SpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// `detail` is either a plain string or `{status, message}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    detail: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Structured { message: String },
}

pub struct ElevenLabsSpeech {
    client: Client,
    api_key: String,
    model_id: String,
    timeout: Duration,
}

impl ElevenLabsSpeech {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout,
        }
    }

    fn url(voice_id: &str) -> String {
        format!("{TTS_URL}/{voice_id}?output_format=mp3_44100_128")
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            detail: ErrorDetail::Text(message),
        })
        | Ok(ErrorEnvelope {
            detail: ErrorDetail::Structured { message },
        }) => message,
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl SpeechService for ElevenLabsSpeech {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SpeechServiceError> {
        let resp = self
            .client
            .post(Self::url(voice_id))
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .timeout(self.timeout)
            .json(&SpeechBody {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechServiceError::Timeout(self.timeout.as_secs())
                } else {
                    SpeechServiceError::Network(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(speech_error_for_status(status.as_u16(), error_message(&body)));
        }

        let audio = resp
            .bytes()
            .await
            .map_err(|e| SpeechServiceError::Network(e.to_string()))?;

        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_includes_voice_and_format() {
        assert_eq!(
            ElevenLabsSpeech::url("IKne3meq5aSn9XLyUdCD"),
            "https://api.elevenlabs.io/v1/text-to-speech/IKne3meq5aSn9XLyUdCD?output_format=mp3_44100_128"
        );
    }

    #[test]
    fn test_body_uses_multilingual_model() {
        let json = serde_json::to_value(SpeechBody {
            text: "Hi Mom!",
            model_id: DEFAULT_MODEL_ID,
        })
        .unwrap();
        assert_eq!(json["model_id"], "eleven_multilingual_v2");
        assert_eq!(json["text"], "Hi Mom!");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"detail":{"status":"quota_exceeded","message":"Out of credits"}}"#),
            "Out of credits"
        );
        assert_eq!(error_message(r#"{"detail":"Not Found"}"#), "Not Found");
        assert_eq!(error_message("oops"), "oops");
    }
}
