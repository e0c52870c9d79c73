//! Turn-by-turn conversation history
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::core::ChatServiceError;
use crate::features::chat::{ChatRequest, ChatService, Turn};
use crate::features::personas::OwnerTerm;
use log::{debug, error};
use uuid::Uuid;

/// Synthetic opener sent before the owner types anything
pub fn greeting_message(owner: OwnerTerm) -> String {
    format!("Say a short excited hi! Your {owner} just opened the app to talk to you.")
}

/// Append-only history of one conversation with one pet.
///
/// Not meant to be shared: every mutation goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    turns: Vec<Turn>,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read-only view for rendering
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Record the user's message, ask the chat service for a reply, record the reply.
    ///
    /// The user turn is kept even when the service fails; only the assistant
    /// turn depends on success. `user_text` is not validated.
    pub async fn append_and_request_reply(
        &mut self,
        user_text: &str,
        system_prompt: &str,
        chat: &dyn ChatService,
    ) -> Result<String, ChatServiceError> {
        self.turns.push(Turn::user(user_text));
        debug!("[{}] Requesting reply with {} turns", self.id, self.turns.len());

        let request = ChatRequest::new(self.id, system_prompt, &self.turns);
        let reply = match chat.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("[{}] Chat request failed, user turn kept without reply: {e}", self.id);
                return Err(e);
            }
        };

        self.turns.push(Turn::assistant(reply.clone()));
        debug!("[{}] Got reply: {} chars", self.id, reply.len());
        Ok(reply)
    }

    /// Run the greeting exchange. It stays in history like any other round.
    pub async fn greet(
        &mut self,
        owner: OwnerTerm,
        system_prompt: &str,
        chat: &dyn ChatService,
    ) -> Result<String, ChatServiceError> {
        let greeting = greeting_message(owner);
        self.append_and_request_reply(&greeting, system_prompt, chat)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chat::Role;
    use crate::features::conversation::fakes::ScriptedChat;

    #[tokio::test]
    async fn test_round_appends_user_then_assistant() {
        let chat = ScriptedChat::replying(&["I LOVE walks!"]);
        let mut session = ConversationSession::new();

        let reply = session
            .append_and_request_reply("want a walk?", "You are Max", &chat)
            .await
            .unwrap();

        assert_eq!(reply, "I LOVE walks!");
        assert_eq!(session.len(), 2);
        assert_eq!(session.turns()[0], Turn::user("want a walk?"));
        assert_eq!(session.turns()[1], Turn::assistant("I LOVE walks!"));
    }

    #[tokio::test]
    async fn test_service_sees_full_history_and_prompt() {
        let chat = ScriptedChat::replying(&["first", "second"]);
        let mut session = ConversationSession::new();

        session
            .append_and_request_reply("one", "You are Max", &chat)
            .await
            .unwrap();
        session
            .append_and_request_reply("two", "You are Max", &chat)
            .await
            .unwrap();

        let calls = chat.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].system_prompt, "You are Max");
        assert_eq!(calls[0].turns, vec![Turn::user("one")]);
        assert_eq!(
            calls[1].turns,
            vec![Turn::user("one"), Turn::assistant("first"), Turn::user("two")]
        );
        assert_eq!(calls[1].max_tokens, 300);
    }

    #[tokio::test]
    async fn test_requests_carry_session_id() {
        let chat = ScriptedChat::replying(&["woof"]);
        let mut session = ConversationSession::new();

        session
            .append_and_request_reply("hi", "You are Max", &chat)
            .await
            .unwrap();

        assert_eq!(chat.calls()[0].session_id, session.id());
    }

    #[tokio::test]
    async fn test_failure_keeps_only_user_turn() {
        let chat = ScriptedChat::failing();
        let mut session = ConversationSession::new();

        let err = session
            .append_and_request_reply("hello?", "You are Max", &chat)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatServiceError::RateLimited(_)));
        assert_eq!(session.len(), 1);
        assert_eq!(session.turns()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_empty_user_text_is_sent() {
        let chat = ScriptedChat::replying(&["...huh?"]);
        let mut session = ConversationSession::new();

        session
            .append_and_request_reply("", "You are Max", &chat)
            .await
            .unwrap();

        assert_eq!(session.turns()[0].content, "");
        assert_eq!(session.len(), 2);
    }

    #[tokio::test]
    async fn test_greet_uses_owner_term() {
        let chat = ScriptedChat::replying(&["HI MOM!!"]);
        let mut session = ConversationSession::new();

        let reply = session
            .greet(OwnerTerm::Mom, "You are Max", &chat)
            .await
            .unwrap();

        assert_eq!(reply, "HI MOM!!");
        assert_eq!(session.len(), 2);
        assert_eq!(
            session.turns()[0].content,
            "Say a short excited hi! Your Mom just opened the app to talk to you."
        );
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(ConversationSession::new().id(), ConversationSession::new().id());
        assert!(ConversationSession::default().is_empty());
    }
}
