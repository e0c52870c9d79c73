//! Voice presets for speech synthesis
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// All available voice presets (display_name, voice_id)
pub const VOICE_CHOICES: &[(&str, &str)] = &[
    (
        "Charlie (friendly, warm - great for loyal dogs)",
        "IKne3meq5aSn9XLyUdCD",
    ),
    (
        "George (deep, calm - great for big dogs)",
        "JBFqnCBsd6RMkjVDRZzb",
    ),
    (
        "Matilda (soft, sweet - great for gentle pets)",
        "XrExE9yKIg1WjnnlVkGX",
    ),
    (
        "Aria (expressive - great for sassy cats)",
        "9BWtsMINqrJLrRacOk9x",
    ),
    (
        "Roger (laid-back - great for chill pets)",
        "CwhRBWXzGAHq8TQ4Fs17",
    ),
];

/// Voice used when nothing else is chosen
pub fn default_voice_id() -> &'static str {
    VOICE_CHOICES[0].1
}

/// Display names in registry order, for select menus
pub fn voice_names() -> Vec<&'static str> {
    VOICE_CHOICES.iter().map(|(name, _)| *name).collect()
}

/// Resolve a voice from a display name, its short name ("Charlie") or a raw id
pub fn resolve_voice(input: &str) -> Option<&'static str> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    VOICE_CHOICES
        .iter()
        .find(|(name, id)| {
            *name == input
                || *id == input
                || short_name(name).eq_ignore_ascii_case(input)
        })
        .map(|(_, id)| *id)
}

/// Display name for a voice id
pub fn voice_name_for(id: &str) -> Option<&'static str> {
    VOICE_CHOICES
        .iter()
        .find(|(_, vid)| *vid == id)
        .map(|(name, _)| *name)
}

fn short_name(display: &str) -> &str {
    display.split_whitespace().next().unwrap_or(display)
}
