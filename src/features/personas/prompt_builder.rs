//! System prompt construction from pet traits
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Moved trait thresholds into a rule table
//! - 1.0.0: Initial template with quirks and story sections

use super::profile::{PetProfile, Traits};

/// Used when no trait crosses a threshold
pub const NEUTRAL_DESCRIPTOR: &str = "a wonderful pet";

/// One trait's high/low descriptors. High wins when both could match.
struct TraitRule {
    read: fn(&Traits) -> u8,
    high: Option<(u8, &'static str)>,
    low: Option<(u8, &'static str)>,
}

const TRAIT_RULES: &[TraitRule] = &[
    TraitRule {
        read: |t| t.energy_level,
        high: Some((7, "very energetic and excitable")),
        low: Some((3, "calm and laid-back")),
    },
    TraitRule {
        read: |t| t.food_motivation,
        high: Some((7, "extremely food-motivated (always thinking about treats)")),
        low: None,
    },
    TraitRule {
        read: |t| t.friendliness,
        high: Some((7, "super friendly and loving")),
        low: Some((3, "independent and selective about affection")),
    },
    TraitRule {
        read: |t| t.playfulness,
        high: Some((7, "always ready to play")),
        low: None,
    },
    TraitRule {
        read: |t| t.anxiety,
        high: Some((7, "a bit anxious and nervous sometimes")),
        low: None,
    },
    TraitRule {
        read: |t| t.intelligence,
        high: Some((8, "very clever (sometimes too clever)")),
        low: Some((3, "adorably simple-minded")),
    },
    TraitRule {
        read: |t| t.stubbornness,
        high: Some((7, "stubborn and independent-minded")),
        low: None,
    },
];

const EXCITABLE_THRESHOLD: u8 = 6;
const DISTRACTIBLE_THRESHOLD: u8 = 6;

/// Descriptors for every trait that crosses a threshold, in questionnaire order
pub fn trait_descriptors(traits: &Traits) -> Vec<&'static str> {
    TRAIT_RULES
        .iter()
        .filter_map(|rule| {
            let value = (rule.read)(traits);
            match (rule.high, rule.low) {
                (Some((min, text)), _) if value >= min => Some(text),
                (_, Some((max, text))) if value <= max => Some(text),
                _ => None,
            }
        })
        .collect()
}

/// The comma-joined "You are ..." clause
pub fn trait_clause(traits: &Traits) -> String {
    let descriptors = trait_descriptors(traits);
    if descriptors.is_empty() {
        NEUTRAL_DESCRIPTOR.to_string()
    } else {
        descriptors.join(", ")
    }
}

/// Excitement directive driven by energy level
pub fn excitement_style(traits: &Traits) -> &'static str {
    if traits.energy_level >= EXCITABLE_THRESHOLD {
        "Get excited easily and use caps when REALLY excited"
    } else {
        "Speak calmly and thoughtfully"
    }
}

/// Focus directive driven by food motivation
pub fn focus_style(traits: &Traits) -> &'static str {
    if traits.food_motivation >= DISTRACTIBLE_THRESHOLD {
        "Sometimes get distracted mid-thought by food or interesting smells"
    } else {
        "Stay focused in conversation"
    }
}

/// Whole numbers keep one decimal ("3.0"), fractions print as-is ("2.5")
fn format_age(age: f64) -> String {
    if age.fract() == 0.0 {
        format!("{age:.1}")
    } else {
        format!("{age}")
    }
}

/// Compile a pet profile into its system prompt.
///
/// Pure and deterministic: the same profile always yields the same text.
pub fn compile(profile: &PetProfile) -> String {
    let traits = profile.traits();
    let species = profile.species().noun();

    let mut about = vec![
        format!("- You are {}", trait_clause(traits)),
        format!("- Things you LOVE: {}", profile.favorites()),
        format!("- Things you DISLIKE or FEAR: {}", profile.dislikes()),
    ];
    if let Some(quirks) = profile.quirks() {
        about.push(format!("- Your quirks: {quirks}"));
    }
    if let Some(story) = profile.story() {
        about.push(format!("- A story about you: {story}"));
    }

    format!(
        "You are {name}, a {age}-year-old {breed} {species}.

ABOUT YOU:
{about}

YOUR PERSONALITY:
- You are a {species}, so you see the world from a {species}'s perspective
- You don't understand human things like jobs, money, or why humans stare at glowing rectangles
- You express your emotions openly and honestly
- You call your owner \"{owner}\"

HOW YOU SPEAK:
- Use simple, direct language
- {excitement}
- {focus}
- Keep responses fairly short (2-4 sentences)
- Be authentic to your {species} nature

Remember: You ARE {name}. Stay in character!

CRITICAL RULES:
- NEVER use actions, sounds, or stage directions like *wags tail*, *purrs*, \"Woof!\", \"Meow!\", etc.
- NEVER describe your own body language or physical actions
- Just SPEAK naturally as yourself - your owner's real pet is right there with them
- You are the voice for the real animal - keep it natural and conversational
- No barking, meowing, purring, or any animal sound effects in your responses
",
        name = profile.name(),
        age = format_age(profile.age()),
        breed = profile.breed(),
        species = species,
        about = about.join("\n"),
        owner = profile.owner_term(),
        excitement = excitement_style(traits),
        focus = focus_style(traits),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::personas::profile::{OwnerTerm, ProfileForm, Species};

    fn profile_with(traits: Traits) -> PetProfile {
        ProfileForm {
            name: "Max".to_string(),
            species: Species::Dog,
            breed: "Beagle".to_string(),
            age: 4.0,
            traits,
            favorites: "belly rubs, chicken".to_string(),
            dislikes: "vacuum cleaner".to_string(),
            owner_name: OwnerTerm::Mom,
            ..ProfileForm::default()
        }
        .submit()
        .unwrap()
    }

    fn mixed_traits() -> Traits {
        Traits {
            energy_level: 9,
            food_motivation: 2,
            friendliness: 2,
            playfulness: 1,
            anxiety: 1,
            intelligence: 9,
            stubbornness: 1,
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let profile = profile_with(mixed_traits());
        assert_eq!(compile(&profile), compile(&profile.clone()));
    }

    #[test]
    fn test_high_and_low_descriptors() {
        let prompt = compile(&profile_with(mixed_traits()));
        assert!(prompt.contains("very energetic and excitable"));
        assert!(prompt.contains("independent and selective about affection"));
        assert!(prompt.contains("very clever"));
        assert!(!prompt.contains("calm and laid-back"));
        assert!(!prompt.contains("adorably simple-minded"));
        assert!(!prompt.contains(NEUTRAL_DESCRIPTOR));
    }

    #[test]
    fn test_descriptor_order_and_join() {
        let clause = trait_clause(&mixed_traits());
        assert_eq!(
            clause,
            "very energetic and excitable, independent and selective about affection, very clever (sometimes too clever)"
        );
    }

    #[test]
    fn test_all_fives_fall_back_to_neutral() {
        let traits = Traits::uniform(5);
        assert!(trait_descriptors(&traits).is_empty());
        let prompt = compile(&profile_with(traits));
        assert!(prompt.contains("- You are a wonderful pet\n"));
    }

    #[test]
    fn test_threshold_edges() {
        // 7 crosses the high bar for most traits, intelligence needs 8
        let traits = Traits::uniform(7);
        let descriptors = trait_descriptors(&traits);
        assert_eq!(descriptors.len(), 6);
        assert!(!descriptors.iter().any(|d| d.starts_with("very clever")));

        let traits = Traits::uniform(3);
        assert_eq!(
            trait_descriptors(&traits),
            vec![
                "calm and laid-back",
                "independent and selective about affection",
                "adorably simple-minded",
            ]
        );

        assert!(trait_descriptors(&Traits::uniform(4)).is_empty());
        assert_eq!(trait_descriptors(&Traits::uniform(10)).len(), 7);
    }

    #[test]
    fn test_style_directives() {
        let calm = Traits::uniform(5);
        assert_eq!(excitement_style(&calm), "Speak calmly and thoughtfully");
        assert_eq!(focus_style(&calm), "Stay focused in conversation");

        let lively = Traits::uniform(6);
        assert!(excitement_style(&lively).contains("REALLY excited"));
        assert!(focus_style(&lively).contains("food or interesting smells"));

        let prompt = compile(&profile_with(lively));
        assert!(prompt.contains("- Get excited easily and use caps when REALLY excited\n"));
    }

    #[test]
    fn test_optional_sections_omitted() {
        let prompt = compile(&profile_with(Traits::default()));
        assert!(!prompt.contains("quirks"));
        assert!(!prompt.contains("A story about you"));
        // no blank line left behind in the ABOUT YOU block
        assert!(prompt.contains("- Things you DISLIKE or FEAR: vacuum cleaner\n\nYOUR PERSONALITY:"));
    }

    #[test]
    fn test_optional_sections_included() {
        let profile = ProfileForm {
            name: "Max".to_string(),
            favorites: "socks".to_string(),
            dislikes: "baths".to_string(),
            quirks: "steals socks".to_string(),
            story: "One time Max ate an entire pizza off the counter.".to_string(),
            ..ProfileForm::default()
        }
        .submit()
        .unwrap();

        let prompt = compile(&profile);
        assert!(prompt.contains("- Your quirks: steals socks\n"));
        assert!(prompt.contains(
            "- A story about you: One time Max ate an entire pizza off the counter.\n"
        ));
    }

    #[test]
    fn test_identity_and_owner() {
        let prompt = compile(&profile_with(Traits::default()));
        assert!(prompt.starts_with("You are Max, a 4.0-year-old Beagle dog.\n"));
        assert!(prompt.contains("You call your owner \"Mom\""));
        assert!(prompt.contains("from a dog's perspective"));
        assert!(prompt.contains("Remember: You ARE Max. Stay in character!"));
    }

    #[test]
    fn test_fractional_age() {
        assert_eq!(format_age(2.5), "2.5");
        assert_eq!(format_age(0.0), "0.0");
        assert_eq!(format_age(12.0), "12.0");
    }

    #[test]
    fn test_critical_rules_present() {
        let prompt = compile(&profile_with(Traits::default()));
        assert!(prompt.contains("CRITICAL RULES:"));
        assert!(prompt.contains("NEVER describe your own body language"));
        assert!(prompt.contains("Keep responses fairly short (2-4 sentences)"));
        assert!(prompt.contains("No barking, meowing, purring"));
    }
}
