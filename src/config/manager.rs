use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::paths;
use crate::profile::{Level, Mood, Subject};
use crate::voice::{Gender, Language};

/// Default settings in the `[mentor]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentorConfig {
    /// Default chat provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Learner name.
    pub name: Option<String>,
    pub level: Option<Level>,
    pub subjects: Option<Vec<Subject>>,
    pub mood: Option<Mood>,
    /// Where synthesized answers are written.
    pub audio_dir: Option<PathBuf>,
}

/// The `[voice]` section. Unset fields fall back to the level default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceSection {
    pub lang: Option<Language>,
    pub gender: Option<Gender>,
    pub speed: Option<i32>,
}

/// An OpenAI-compatible chat provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Models known to work with this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        key_from(self.api_key_env.as_deref(), self.api_key.as_ref())
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The `[speech]` section: Azure Speech settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Azure region, e.g. `koreacentral`.
    pub region: Option<String>,
    /// Full endpoint URL; overrides `region`.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    /// Azure output format name.
    pub output_format: Option<String>,
}

impl SpeechConfig {
    pub const DEFAULT_API_KEY_ENV: &'static str = "AZURE_SPEECH_KEY";
    pub const DEFAULT_REGION_ENV: &'static str = "AZURE_REGION";

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or(Self::DEFAULT_API_KEY_ENV)
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        key_from(Some(self.api_key_env()), self.api_key.as_ref())
    }
}

fn key_from(env_var: Option<&str>, fallback: Option<&String>) -> Option<String> {
    if let Some(env_var) = env_var
        && let Ok(key) = std::env::var(env_var)
        && !key.is_empty()
    {
        return Some(key);
    }
    fallback.cloned()
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/mentor/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub mentor: MentorConfig,
    #[serde(default)]
    pub voice: VoiceSection,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/mentor/config.toml`
    /// or `~/.config/mentor/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        crate::fs::atomic_write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file; a missing file is an empty config.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut providers = HashMap::new();
        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                endpoint: "https://api.openai.com".to_string(),
                api_key: None,
                api_key_env: Some("OPENAI_API_KEY".to_string()),
                models: vec!["gpt-4o".to_string()],
            },
        );

        let config = ConfigFile {
            mentor: MentorConfig {
                provider: Some("openai".to_string()),
                model: Some("gpt-4o".to_string()),
                level: Some(Level::Elementary),
                subjects: Some(vec![Subject::Math, Subject::Science]),
                ..MentorConfig::default()
            },
            voice: VoiceSection {
                lang: Some(Language::JaJp),
                gender: Some(Gender::Male),
                speed: Some(-20),
            },
            providers,
            speech: SpeechConfig {
                region: Some("koreacentral".to_string()),
                ..SpeechConfig::default()
            },
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.mentor.provider, Some("openai".to_string()));
        assert_eq!(loaded.mentor.level, Some(Level::Elementary));
        assert_eq!(
            loaded.mentor.subjects,
            Some(vec![Subject::Math, Subject::Science])
        );
        assert_eq!(loaded.voice.lang, Some(Language::JaJp));
        assert_eq!(loaded.voice.speed, Some(-20));
        assert_eq!(loaded.speech.region, Some("koreacentral".to_string()));
        assert!(loaded.providers.contains_key("openai"));
    }

    #[test]
    fn test_parse_handwritten_config() {
        let toml = r#"
            [mentor]
            provider = "local"
            level = "middle-school"
            subjects = ["english", "korean"]
            mood = "struggling"

            [voice]
            lang = "en-US"
            gender = "female"
            speed = 20

            [providers.local]
            endpoint = "http://localhost:11434"

            [speech]
            region = "eastus"
            output_format = "riff-24khz-16bit-mono-pcm"
        "#;

        let config: ConfigFile = toml::from_str(toml).unwrap();

        assert_eq!(config.mentor.level, Some(Level::MiddleSchool));
        assert_eq!(config.mentor.mood, Some(Mood::Struggling));
        assert_eq!(config.voice.lang, Some(Language::EnUs));
        assert_eq!(config.providers["local"].endpoint, "http://localhost:11434");
        assert!(config.providers["local"].models.is_empty());
        assert_eq!(
            config.speech.output_format.as_deref(),
            Some("riff-24khz-16bit-mono-pcm")
        );
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().unwrap().providers.is_empty());
    }

    #[test]
    fn test_load_or_default_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[mentor\nlevel = ").unwrap();

        let err = manager.load_or_default().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_from_env() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::set_var("MENTOR_TEST_API_KEY", "test-key-value");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("MENTOR_TEST_API_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("test-key-value".to_string()));

        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("MENTOR_TEST_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_fallback() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("MENTOR_NONEXISTENT_KEY");
        }

        let provider = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: Some("fallback-key".to_string()),
            api_key_env: Some("MENTOR_NONEXISTENT_KEY".to_string()),
            models: vec![],
        };

        assert_eq!(provider.get_api_key(), Some("fallback-key".to_string()));
    }

    #[test]
    fn test_provider_requires_api_key() {
        let provider_with_env = ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            api_key: None,
            api_key_env: Some("API_KEY".to_string()),
            models: vec![],
        };
        assert!(provider_with_env.requires_api_key());

        let provider_without = ProviderConfig {
            endpoint: "http://localhost:11434".to_string(),
            api_key: None,
            api_key_env: None,
            models: vec![],
        };
        assert!(!provider_without.requires_api_key());
    }

    #[test]
    fn test_speech_api_key_env_default() {
        let speech = SpeechConfig::default();
        assert_eq!(speech.api_key_env(), "AZURE_SPEECH_KEY");

        let custom = SpeechConfig {
            api_key_env: Some("MY_SPEECH_KEY".to_string()),
            ..SpeechConfig::default()
        };
        assert_eq!(custom.api_key_env(), "MY_SPEECH_KEY");
    }
}
