//! # Feature: Pet Profiles
//!
//! The pet's identity, its seven personality traits, and the raw form that
//! produces a validated profile.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Load profile forms from YAML files
//! - 1.0.0: Initial release with questionnaire validation

use super::voices;
use crate::core::{ConfigError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRAIT_MIN: u8 = 1;
pub const TRAIT_MAX: u8 = 10;
pub const MAX_AGE_YEARS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Species {
    #[default]
    Dog,
    Cat,
    Bird,
    Rabbit,
    Hamster,
    Other,
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Dog,
        Species::Cat,
        Species::Bird,
        Species::Rabbit,
        Species::Hamster,
        Species::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
            Species::Rabbit => "Rabbit",
            Species::Hamster => "Hamster",
            Species::Other => "Other",
        }
    }

    /// Lowercase form used inside prompt sentences ("a 3.0-year-old mixed dog")
    pub fn noun(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the pet calls its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OwnerTerm {
    #[default]
    Dad,
    Mom,
    #[serde(rename = "my human")]
    MyHuman,
    #[serde(rename = "my person")]
    MyPerson,
}

impl OwnerTerm {
    pub const ALL: [OwnerTerm; 4] = [
        OwnerTerm::Dad,
        OwnerTerm::Mom,
        OwnerTerm::MyHuman,
        OwnerTerm::MyPerson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerTerm::Dad => "Dad",
            OwnerTerm::Mom => "Mom",
            OwnerTerm::MyHuman => "my human",
            OwnerTerm::MyPerson => "my person",
        }
    }
}

impl fmt::Display for OwnerTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seven personality axes, each rated 1 (low) to 10 (high)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traits {
    pub energy_level: u8,
    pub food_motivation: u8,
    pub friendliness: u8,
    pub playfulness: u8,
    pub anxiety: u8,
    pub intelligence: u8,
    pub stubbornness: u8,
}

impl Default for Traits {
    /// Questionnaire slider defaults
    fn default() -> Self {
        Self {
            energy_level: 5,
            food_motivation: 5,
            friendliness: 5,
            playfulness: 5,
            anxiety: 3,
            intelligence: 5,
            stubbornness: 5,
        }
    }
}

impl Traits {
    /// Every trait set to the same value
    pub fn uniform(value: u8) -> Self {
        Self {
            energy_level: value,
            food_motivation: value,
            friendliness: value,
            playfulness: value,
            anxiety: value,
            intelligence: value,
            stubbornness: value,
        }
    }

    /// (key, value) pairs in questionnaire order
    pub fn entries(&self) -> [(&'static str, u8); 7] {
        [
            ("energy_level", self.energy_level),
            ("food_motivation", self.food_motivation),
            ("friendliness", self.friendliness),
            ("playfulness", self.playfulness),
            ("anxiety", self.anxiety),
            ("intelligence", self.intelligence),
            ("stubbornness", self.stubbornness),
        ]
    }

    fn out_of_range(&self) -> Vec<String> {
        self.entries()
            .iter()
            .filter(|(_, v)| !(TRAIT_MIN..=TRAIT_MAX).contains(v))
            .map(|(k, _)| format!("traits.{k}"))
            .collect()
    }
}

/// A validated pet. Only `voice_enabled` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetProfile {
    name: String,
    species: Species,
    breed: String,
    age: f64,
    traits: Traits,
    favorites: String,
    dislikes: String,
    quirks: Option<String>,
    story: Option<String>,
    owner_term: OwnerTerm,
    voice_id: String,
    voice_enabled: bool,
}

impl PetProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn traits(&self) -> &Traits {
        &self.traits
    }

    pub fn favorites(&self) -> &str {
        &self.favorites
    }

    pub fn dislikes(&self) -> &str {
        &self.dislikes
    }

    pub fn quirks(&self) -> Option<&str> {
        self.quirks.as_deref()
    }

    pub fn story(&self) -> Option<&str> {
        self.story.as_deref()
    }

    pub fn owner_term(&self) -> OwnerTerm {
        self.owner_term
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }
}

/// Raw questionnaire answers, exactly as typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub age: f64,
    pub traits: Traits,
    pub favorites: String,
    pub dislikes: String,
    pub quirks: String,
    pub story: String,
    pub owner_name: OwnerTerm,
    /// Voice display name, short name, or raw id
    pub voice: String,
    pub voice_enabled: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            species: Species::Dog,
            breed: String::new(),
            age: 3.0,
            traits: Traits::default(),
            favorites: String::new(),
            dislikes: String::new(),
            quirks: String::new(),
            story: String::new(),
            owner_name: OwnerTerm::Dad,
            voice: voices::default_voice_id().to_string(),
            voice_enabled: true,
        }
    }
}

impl ProfileForm {
    /// Load a form from a YAML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Validate the answers and build a profile.
    ///
    /// Reports every invalid field, not just the first.
    pub fn submit(&self) -> Result<PetProfile, ValidationError> {
        let mut invalid = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            invalid.push("name".to_string());
        }
        let favorites = self.favorites.trim();
        if favorites.is_empty() {
            invalid.push("favorites".to_string());
        }
        let dislikes = self.dislikes.trim();
        if dislikes.is_empty() {
            invalid.push("dislikes".to_string());
        }
        if !self.age.is_finite() || self.age < 0.0 || self.age > MAX_AGE_YEARS {
            invalid.push("age".to_string());
        }
        invalid.extend(self.traits.out_of_range());

        let voice_id = voices::resolve_voice(&self.voice);
        if voice_id.is_none() {
            invalid.push("voice".to_string());
        }

        match voice_id {
            Some(voice_id) if invalid.is_empty() => Ok(PetProfile {
                name: name.to_string(),
                species: self.species,
                breed: non_blank(&self.breed).unwrap_or_else(|| "mixed".to_string()),
                age: self.age,
                traits: self.traits,
                favorites: favorites.to_string(),
                dislikes: dislikes.to_string(),
                quirks: non_blank(&self.quirks),
                story: non_blank(&self.story),
                owner_term: self.owner_name,
                voice_id: voice_id.to_string(),
                voice_enabled: self.voice_enabled,
            }),
            _ => Err(ValidationError::new(invalid)),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
