//! Per-user session state
//!
//! One `SessionContext` per person using the app. Nothing in here is global,
//! so two contexts never see each other's pet or history.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Speech logs carry the conversation id
//! - 1.1.0: Speak the greeting when voice is on
//! - 1.0.0: Initial release

use super::session::ConversationSession;
use crate::core::SessionError;
use crate::features::chat::{ChatService, Turn};
use crate::features::personas::{compile, PetProfile};
use crate::features::speech::SpeechService;
use log::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Questionnaire,
    Chat,
}

/// What happened to the audio for one reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Voice is switched off; the speech service was not called
    Disabled,
    Audio(Vec<u8>),
    /// Synthesis failed; the text reply still stands
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnOutcome {
    pub reply: String,
    pub speech: SpeechOutcome,
}

/// The profile, its compiled prompt, and the conversation, which live and die together
#[derive(Debug, Clone)]
pub struct ActivePet {
    profile: PetProfile,
    system_prompt: String,
    conversation: ConversationSession,
}

impl ActivePet {
    fn new(profile: PetProfile) -> Self {
        let system_prompt = compile(&profile);
        Self {
            profile,
            system_prompt,
            conversation: ConversationSession::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionContext {
    page: Page,
    pet: Option<ActivePet>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn profile(&self) -> Option<&PetProfile> {
        self.pet.as_ref().map(|p| &p.profile)
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.pet.as_ref().map(|p| p.system_prompt.as_str())
    }

    pub fn history(&self) -> &[Turn] {
        self.pet
            .as_ref()
            .map(|p| p.conversation.turns())
            .unwrap_or(&[])
    }

    /// Compile the prompt for a new pet and open an empty conversation.
    ///
    /// Replaces any previous pet wholesale.
    pub fn create_pet(&mut self, profile: PetProfile) -> &str {
        let pet = ActivePet::new(profile);
        info!(
            "[{}] Created pet {} ({})",
            pet.conversation.id(),
            pet.profile.name(),
            pet.profile.species()
        );
        self.page = Page::Chat;
        &self.pet.insert(pet).system_prompt
    }

    /// Forget the current pet and go back to the questionnaire
    pub fn new_pet(&mut self) {
        if let Some(pet) = self.pet.take() {
            info!("[{}] Discarded pet {}", pet.conversation.id(), pet.profile.name());
        }
        self.page = Page::Questionnaire;
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) -> Result<(), SessionError> {
        let pet = self.pet.as_mut().ok_or(SessionError::NoActivePet)?;
        pet.profile.set_voice_enabled(enabled);
        info!(
            "[{}] Voice {}",
            pet.conversation.id(),
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Run the greeting exchange if nothing has been said yet.
    ///
    /// Returns `None` when the conversation already has turns.
    pub async fn start(
        &mut self,
        chat: &dyn ChatService,
        speech: &dyn SpeechService,
    ) -> Result<Option<ChatTurnOutcome>, SessionError> {
        let ActivePet {
            profile,
            system_prompt,
            conversation,
        } = self.pet.as_mut().ok_or(SessionError::NoActivePet)?;

        if !conversation.is_empty() {
            return Ok(None);
        }

        let reply = conversation
            .greet(profile.owner_term(), system_prompt, chat)
            .await?;
        let speech = render_speech(conversation.id(), profile, &reply, speech).await;
        Ok(Some(ChatTurnOutcome { reply, speech }))
    }

    /// One chat round: the owner's message, the pet's reply, and optional audio
    pub async fn send(
        &mut self,
        user_text: &str,
        chat: &dyn ChatService,
        speech: &dyn SpeechService,
    ) -> Result<ChatTurnOutcome, SessionError> {
        let ActivePet {
            profile,
            system_prompt,
            conversation,
        } = self.pet.as_mut().ok_or(SessionError::NoActivePet)?;

        let reply = conversation
            .append_and_request_reply(user_text, system_prompt, chat)
            .await?;
        let speech = render_speech(conversation.id(), profile, &reply, speech).await;
        Ok(ChatTurnOutcome { reply, speech })
    }
}

/// Voice a reply if the profile wants it. Never fails.
async fn render_speech(
    session_id: Uuid,
    profile: &PetProfile,
    reply: &str,
    speech: &dyn SpeechService,
) -> SpeechOutcome {
    if !profile.voice_enabled() {
        return SpeechOutcome::Disabled;
    }
    debug!(
        "[{session_id}] Synthesizing {} chars with voice {}",
        reply.len(),
        profile.voice_id()
    );
    match speech.synthesize(reply, profile.voice_id()).await {
        Ok(audio) => {
            info!("[{session_id}] Speech synthesis successful, {} bytes", audio.len());
            SpeechOutcome::Audio(audio)
        }
        Err(e) => {
            warn!("[{session_id}] Voice error: {e}");
            SpeechOutcome::Failed(format!("Voice error: {e}"))
        }
    }
}
