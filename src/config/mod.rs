//! Configuration file management and settings resolution.

mod manager;
mod resolve;

pub use manager::{
    ConfigFile, ConfigManager, MentorConfig, ProviderConfig, SpeechConfig, VoiceSection,
};
pub use resolve::{
    BUILTIN_PROVIDER, ResolveOptions, ResolvedConfig, ResolvedSpeech, resolve_config,
};
