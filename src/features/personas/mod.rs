//! # Personas Feature
//!
//! Pet profiles, the voice registry, and the trait-driven system prompt compiler.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: YAML profile forms
//! - 1.0.0: Initial release

pub mod profile;
pub mod prompt_builder;
pub mod voices;

pub use profile::{OwnerTerm, PetProfile, ProfileForm, Species, Traits};
pub use prompt_builder::compile;
pub use voices::VOICE_CHOICES;
