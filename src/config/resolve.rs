use anyhow::{Result, bail};
use std::path::PathBuf;

use super::manager::{ConfigFile, ProviderConfig, SpeechConfig};
use crate::llm::DEFAULT_MODEL;
use crate::profile::{LearnerProfile, Level, Mood, Subject};
use crate::speech::{AzureSpeechClient, DEFAULT_OUTPUT_FORMAT};
use crate::ui::Style;
use crate::voice::{Gender, Language, VoiceConfig, validate_speed};

/// Provider used when nothing is configured.
pub const BUILTIN_PROVIDER: &str = "openai";

fn builtin_provider() -> ProviderConfig {
    ProviderConfig {
        endpoint: "https://api.openai.com".to_string(),
        api_key: None,
        api_key_env: Some("OPENAI_API_KEY".to_string()),
        models: vec![],
    }
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub name: Option<String>,
    pub level: Option<Level>,
    pub subjects: Option<Vec<Subject>>,
    pub mood: Option<Mood>,
    pub lang: Option<Language>,
    pub gender: Option<Gender>,
    pub speed: Option<i32>,
    pub audio_dir: Option<PathBuf>,
}

/// Where and how to reach the speech service.
#[derive(Debug, Clone)]
pub struct ResolvedSpeech {
    pub url: String,
    pub api_key: String,
    pub output_format: String,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub profile: LearnerProfile,
    pub voice: VoiceConfig,
    pub speech: ResolvedSpeech,
    /// `None` means the default audio directory.
    pub audio_dir: Option<PathBuf>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Precedence, highest first: CLI options, config file, built-in defaults.
/// Voice settings fall back to the default voice for the learner's level.
///
/// # Errors
///
/// Returns an error if the provider is unknown, a required API key is
/// missing, a configured speed is off the grid, or the speech service has
/// no region or endpoint.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let (provider_name, provider_config) = resolve_provider(options, config_file)?;

    let model = options
        .model
        .as_ref()
        .or(config_file.mentor.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Warn if model is not in provider's models list
    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/mentor/config.toml"
        );
    }

    let profile = resolve_profile(options, config_file);
    let voice = resolve_voice_config(options, config_file, profile.level)?;
    let speech = resolve_speech(&config_file.speech)?;

    Ok(ResolvedConfig {
        endpoint: provider_config.endpoint.clone(),
        provider_name,
        model,
        api_key,
        profile,
        voice,
        speech,
        audio_dir: options
            .audio_dir
            .clone()
            .or_else(|| config_file.mentor.audio_dir.clone()),
    })
}

fn resolve_provider(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<(String, ProviderConfig)> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.mentor.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| BUILTIN_PROVIDER.to_string());

    if let Some(provider) = config_file.providers.get(&provider_name) {
        return Ok((provider_name, provider.clone()));
    }

    if provider_name == BUILTIN_PROVIDER {
        return Ok((provider_name, builtin_provider()));
    }

    let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
    available.sort_unstable();

    if available.is_empty() {
        bail!(
            "Provider '{provider_name}' not found\n\n\
             No providers configured. Add providers to ~/.config/mentor/config.toml"
        );
    }

    bail!(
        "Provider '{provider_name}' not found\n\n\
         Available providers:\n  \
         - {}\n\n\
         Add providers to ~/.config/mentor/config.toml",
        available.join("\n  - ")
    )
}

fn resolve_profile(options: &ResolveOptions, config_file: &ConfigFile) -> LearnerProfile {
    let file = &config_file.mentor;

    let name = options
        .name
        .as_ref()
        .or(file.name.as_ref())
        .cloned()
        .unwrap_or_default();
    let level = options.level.or(file.level).unwrap_or_default();
    let subjects = options
        .subjects
        .as_ref()
        .or(file.subjects.as_ref())
        .cloned()
        .unwrap_or_default();
    let mood = options.mood.or(file.mood).unwrap_or_default();

    LearnerProfile::new(name, level, &subjects, mood)
}

/// One place for voice defaults: CLI, then `[voice]`, then the level default.
fn resolve_voice_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    level: Level,
) -> Result<VoiceConfig> {
    let fallback = VoiceConfig::default_for_level(level);
    let file = &config_file.voice;

    let speed = match options.speed.or(file.speed) {
        Some(speed) => validate_speed(speed)?,
        None => fallback.speed,
    };

    Ok(VoiceConfig {
        language: options.lang.or(file.lang).unwrap_or(fallback.language),
        gender: options.gender.or(file.gender).unwrap_or(fallback.gender),
        speed,
    })
}

fn resolve_speech(speech: &SpeechConfig) -> Result<ResolvedSpeech> {
    let url = match (&speech.endpoint, &speech.region) {
        (Some(endpoint), _) => endpoint.clone(),
        (None, Some(region)) => AzureSpeechClient::endpoint_for_region(region),
        (None, None) => match std::env::var(SpeechConfig::DEFAULT_REGION_ENV) {
            Ok(region) if !region.is_empty() => AzureSpeechClient::endpoint_for_region(&region),
            _ => bail!(
                "Missing required configuration: speech 'region'\n\n\
                 Please provide it via:\n  \
                 - Environment: export {}=\"koreacentral\"\n  \
                 - Config file: set region in the [speech] section of ~/.config/mentor/config.toml",
                SpeechConfig::DEFAULT_REGION_ENV
            ),
        },
    };

    let Some(api_key) = speech.get_api_key() else {
        let env_var = speech.api_key_env();
        bail!(
            "The speech service requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in the [speech] section of ~/.config/mentor/config.toml"
        );
    };

    Ok(ResolvedSpeech {
        url,
        api_key,
        output_format: speech
            .output_format
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_FORMAT.to_string()),
    })
}
