//! Argos terminal app: describe your pet, then talk to it.
//!
//! Usage: argos [profile.yaml]
//!
//! With a profile file the questionnaire is skipped for the first pet.
//! In chat, `/voice` toggles speech, `/new` starts over, `/quit` exits.

use anyhow::Result;
use argos::core::{ChatProvider, Config};
use argos::features::access::{AccessGate, MAX_ATTEMPTS};
use argos::features::chat::{chat_service_from_config, ChatService, Role};
use argos::features::conversation::{
    ChatCommand, ChatTurnOutcome, Page, SessionContext, SpeechOutcome,
};
use argos::features::personas::{voices, OwnerTerm, ProfileForm, Species, Traits};
use argos::features::speech::{ElevenLabsSpeech, SpeechService};
use dialoguer::{Confirm, Input, Password, Select};
use dotenvy::dotenv;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("API keys not configured. Please set up your .env file. ({e})");
            std::process::exit(1);
        }
    };

    // The openai crate reads its key from the environment, not from our config
    if config.chat_provider == ChatProvider::OpenAi {
        std::env::set_var("OPENAI_KEY", &config.chat_api_key);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Argos ({:?}, model {})", config.chat_provider, config.chat_model);

    println!("🐾 Argos");
    println!("Give Your Pet a Voice");
    println!("---------------------\n");

    if !unlock(&AccessGate::new(config.password.clone()))? {
        eprintln!("Too many incorrect attempts.");
        std::process::exit(1);
    }

    let chat = chat_service_from_config(&config);
    let speech = ElevenLabsSpeech::new(config.elevenlabs_api_key.clone(), config.request_timeout);

    let mut preset = std::env::args().nth(1).map(|path| ProfileForm::load(&path)).transpose()?;
    let mut ctx = SessionContext::new();

    loop {
        match ctx.page() {
            Page::Questionnaire => {
                let form = match preset.take() {
                    Some(form) => form,
                    None => questionnaire()?,
                };
                match form.submit() {
                    Ok(profile) => {
                        ctx.create_pet(profile);
                    }
                    Err(e) => println!("\n⚠️  {e}\n"),
                }
            }
            Page::Chat => {
                if !chat_page(&mut ctx, chat.as_ref(), &speech, &config.audio_dir).await? {
                    break;
                }
            }
        }
    }

    println!("Bye! 🐾");
    Ok(())
}

/// Ask for the passphrase until it matches or attempts run out
fn unlock(gate: &AccessGate) -> Result<bool> {
    if gate.is_open() {
        return Ok(true);
    }
    for _ in 0..MAX_ATTEMPTS {
        let attempt = Password::new()
            .with_prompt("Enter password to continue")
            .allow_empty_password(true)
            .interact()?;
        if gate.verify(&attempt) {
            return Ok(true);
        }
        println!("Incorrect password");
    }
    Ok(false)
}

fn text(prompt: &str, required: bool) -> Result<String> {
    let label = if required {
        format!("{prompt} *")
    } else {
        format!("{prompt} (optional)")
    };
    Ok(Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?)
}

fn rating(prompt: &str, help: &str, default: u8) -> Result<u8> {
    Ok(Input::<u8>::new()
        .with_prompt(format!("{prompt} [1-10] ({help})"))
        .default(default)
        .validate_with(|v: &u8| -> Result<(), String> {
            if (1..=10).contains(v) {
                Ok(())
            } else {
                Err("Rate from 1 (low) to 10 (high)".to_string())
            }
        })
        .interact_text()?)
}

fn questionnaire() -> Result<ProfileForm> {
    println!("🐾 Create Your Pet");
    println!("Let's build an AI personality for your pet!\n");

    println!("Basic Information");
    let name = text("Pet's name", true)?;
    let species_index = Select::new()
        .with_prompt("Type of animal")
        .items(&Species::ALL)
        .default(0)
        .interact()?;
    let breed = Input::<String>::new()
        .with_prompt("Breed (or 'mixed')")
        .allow_empty(true)
        .interact_text()?;
    let age = Input::<f64>::new()
        .with_prompt("Age (years)")
        .default(3.0)
        .validate_with(|v: &f64| -> Result<(), String> {
            if v.is_finite() && (0.0..=30.0).contains(v) {
                Ok(())
            } else {
                Err("Age must be between 0 and 30".to_string())
            }
        })
        .interact_text()?;

    println!("\nPersonality Traits");
    let defaults = Traits::default();
    let traits = Traits {
        energy_level: rating("Energy level", "1=lazy, 10=hyperactive", defaults.energy_level)?,
        food_motivation: rating("Food motivation", "1=picky, 10=lives for treats", defaults.food_motivation)?,
        friendliness: rating("Friendliness", "1=aloof, 10=loves everyone", defaults.friendliness)?,
        playfulness: rating("Playfulness", "1=serious, 10=always playing", defaults.playfulness)?,
        anxiety: rating("Anxiety level", "1=chill, 10=nervous", defaults.anxiety)?,
        intelligence: rating("Intelligence", "1=adorably dumb, 10=scary smart", defaults.intelligence)?,
        stubbornness: rating("Stubbornness", "1=eager to please, 10=independent", defaults.stubbornness)?,
    };

    println!("\nQuirks & Details");
    let favorites = text("Favorite things (comma-separated)", true)?;
    let dislikes = text("Dislikes or fears (comma-separated)", true)?;
    let quirks = text("Funny quirks or habits", false)?;
    let story = text("A short funny story about your pet", false)?;

    let owner_index = Select::new()
        .with_prompt("What should your pet call you?")
        .items(&OwnerTerm::ALL)
        .default(0)
        .interact()?;

    println!("\nVoice");
    let names = voices::voice_names();
    let voice_index = Select::new()
        .with_prompt("Choose a voice for your pet")
        .items(&names)
        .default(0)
        .interact()?;
    let voice_enabled = Confirm::new()
        .with_prompt("Enable voice (uses more API credits)")
        .default(true)
        .interact()?;

    Ok(ProfileForm {
        name,
        species: Species::ALL[species_index],
        breed,
        age,
        traits,
        favorites,
        dislikes,
        quirks,
        story,
        owner_name: OwnerTerm::ALL[owner_index],
        voice: names[voice_index].to_string(),
        voice_enabled,
    })
}

/// Run the chat page. Returns `false` when the user wants to quit.
async fn chat_page(
    ctx: &mut SessionContext,
    chat: &dyn ChatService,
    speech: &dyn SpeechService,
    audio_dir: &Path,
) -> Result<bool> {
    let Some(profile) = ctx.profile().cloned() else {
        ctx.new_pet();
        return Ok(true);
    };
    let name = profile.name().to_string();

    println!("\n🐾 Chat with {name}");
    println!(
        "About {name}: {} · {} · {} years · voice {}",
        profile.species(),
        profile.breed(),
        profile.age(),
        voices::voice_name_for(profile.voice_id()).unwrap_or("custom")
    );
    println!("Commands: /voice, /new, /quit\n");

    match ctx.start(chat, speech).await {
        Ok(Some(outcome)) => show_reply(&name, &outcome, audio_dir).await,
        Ok(None) => {
            for turn in ctx.history() {
                match turn.role {
                    Role::User => println!("you: {}", turn.content),
                    Role::Assistant => println!("🐾 {name}: {}", turn.content),
                }
            }
        }
        Err(e) => {
            error!("Greeting failed: {e}");
            println!("⚠️  {e}");
        }
    }

    loop {
        let line = Input::<String>::new()
            .with_prompt(format!("Say something to {name}..."))
            .allow_empty(true)
            .interact_text()?;

        match ChatCommand::parse(&line) {
            ChatCommand::Skip => continue,
            ChatCommand::Quit => return Ok(false),
            ChatCommand::NewPet => {
                ctx.new_pet();
                return Ok(true);
            }
            ChatCommand::ToggleVoice => {
                let enabled = !ctx.profile().map(|p| p.voice_enabled()).unwrap_or(false);
                ctx.set_voice_enabled(enabled)?;
                println!("🔊 Voice {}", if enabled { "enabled" } else { "disabled" });
            }
            ChatCommand::Say(text) => match ctx.send(text, chat, speech).await {
                Ok(outcome) => show_reply(&name, &outcome, audio_dir).await,
                Err(e) => println!("⚠️  {e}"),
            },
        }
    }
}

async fn show_reply(name: &str, outcome: &ChatTurnOutcome, audio_dir: &Path) {
    println!("🐾 {name}: {}", outcome.reply);
    match &outcome.speech {
        SpeechOutcome::Disabled => {}
        SpeechOutcome::Audio(bytes) => match save_audio(audio_dir, name, bytes).await {
            Ok(path) => println!("🔊 {}", path.display()),
            Err(e) => {
                warn!("Failed to save audio: {e}");
                println!("⚠️  Voice error: {e}");
            }
        },
        SpeechOutcome::Failed(warning) => println!("⚠️  {warning}"),
    }
}

async fn save_audio(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let slug: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let path = dir.join(format!("{slug}-{stamp}.mp3"));
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
