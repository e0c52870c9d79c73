//! Chat page input
//!
//! Turns one line typed on the chat page into something to do. Blank lines
//! never become a message, so a stray Enter cannot leave an empty user turn
//! in the history.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.2.0

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand<'a> {
    Quit,
    NewPet,
    ToggleVoice,
    /// Nothing but whitespace was entered
    Skip,
    Say(&'a str),
}

impl<'a> ChatCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => ChatCommand::Skip,
            "/quit" => ChatCommand::Quit,
            "/new" => ChatCommand::NewPet,
            "/voice" => ChatCommand::ToggleVoice,
            _ => ChatCommand::Say(line),
        }
    }
}
