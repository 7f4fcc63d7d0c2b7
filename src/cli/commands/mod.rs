//! Subcommand implementations.

use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::consultation::ConsultationSession;
use crate::error::CommandError;
use crate::llm::ChatClient;
use crate::paths;
use crate::speech::AzureSpeechClient;

/// One-shot ask command handler.
pub mod ask;

/// Interactive consultation command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// A session wired to the hosted chat and speech services.
pub type MentorSession = ConsultationSession<ChatClient, AzureSpeechClient>;

/// Loads config.toml and merges it with CLI overrides.
///
/// # Errors
///
/// Returns [`CommandError::Config`] when the file is unreadable or a
/// required setting is missing.
pub fn load_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new().map_err(CommandError::Config)?;
    let config_file = manager.load_or_default().map_err(CommandError::Config)?;
    Ok(resolve_config(options, &config_file).map_err(CommandError::Config)?)
}

/// Builds a session from resolved settings.
pub fn open_session(resolved: ResolvedConfig) -> Result<MentorSession> {
    let audio_dir = match resolved.audio_dir {
        Some(dir) => dir,
        None => paths::audio_dir().map_err(CommandError::Config)?,
    };

    tracing::debug!(
        provider = %resolved.provider_name,
        model = %resolved.model,
        audio_dir = %audio_dir.display(),
        "opening session"
    );

    let chat = ChatClient::new(resolved.endpoint, resolved.api_key);
    let speech = AzureSpeechClient::new(
        resolved.speech.url,
        resolved.speech.api_key,
        resolved.speech.output_format,
    );

    Ok(ConsultationSession::new(
        resolved.profile,
        resolved.voice,
        resolved.model,
        audio_dir,
        chat,
        speech,
    ))
}
