//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{MultiSelect, Select, Text};

use crate::config::{BUILTIN_PROVIDER, ConfigFile, ConfigManager, MentorConfig, VoiceSection};
use crate::error::CommandError;
use crate::llm::DEFAULT_MODEL;
use crate::profile::{Level, Mood, Subject};
use crate::ui::{Style, handle_prompt_cancellation};
use crate::voice::{Gender, Language, MAX_SPEED, MIN_SPEED, SPEED_STEP, VoiceConfig, format_rate};

/// Runs the configure command.
///
/// With `show`, prints the current configuration; otherwise walks the user
/// through the learner, provider and voice defaults and saves them.
pub fn run_configure(show: bool) -> Result<()> {
    let manager = ConfigManager::new().map_err(CommandError::Config)?;
    let config = manager.load_or_default().map_err(CommandError::Config)?;

    if show {
        print_config(&manager, &config);
        return Ok(());
    }

    handle_prompt_cancellation(|| run_configure_inner(&manager, config))
}

fn run_configure_inner(manager: &ConfigManager, mut config: ConfigFile) -> Result<()> {
    print_current_defaults(&config);

    let provider = select_provider(&config)?;
    let available_models = config
        .providers
        .get(&provider)
        .map(|p| p.models.clone())
        .unwrap_or_default();
    let model = select_model(&available_models, config.mentor.model.as_deref())?;

    let name = prompt_name(config.mentor.name.as_deref())?;
    let level = select_one("School level:", &Level::ALL, config.mentor.level)?;
    let subjects = select_subjects(config.mentor.subjects.as_deref())?;
    let mood = select_one("Mood:", &Mood::ALL, config.mentor.mood)?;

    // Voice prompts start from the level default.
    let fallback = VoiceConfig::default_for_level(level);
    let lang = select_one(
        "Voice language:",
        &Language::ALL,
        Some(config.voice.lang.unwrap_or(fallback.language)),
    )?;
    let gender = select_one(
        "Voice gender:",
        &[Gender::Female, Gender::Male],
        Some(config.voice.gender.unwrap_or(fallback.gender)),
    )?;
    let speed = select_speed(config.voice.speed.unwrap_or(fallback.speed))?;

    config.mentor = MentorConfig {
        provider: Some(provider),
        model: Some(model),
        name,
        level: Some(level),
        subjects: Some(subjects),
        mood: Some(mood),
        audio_dir: config.mentor.audio_dir.take(),
    };
    config.voice = VoiceSection {
        lang: Some(lang),
        gender: Some(gender),
        speed: Some(speed),
    };

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn not_set() -> String {
    Style::secondary("(not set)")
}

fn print_current_defaults(config: &ConfigFile) {
    let mentor = &config.mentor;

    println!("{}", Style::header("Current defaults"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        mentor.provider.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("model"),
        mentor.model.as_deref().map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("level"),
        mentor.level.map_or_else(not_set, Style::value)
    );
    println!(
        "  {}     {}",
        Style::label("voice"),
        config.voice.lang.map_or_else(not_set, Style::value)
    );
    println!();
}

fn print_config(manager: &ConfigManager, config: &ConfigFile) {
    let mentor = &config.mentor;
    let voice = &config.voice;

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    println!();

    println!("{}", Style::header("[mentor]"));
    let subjects = mentor.subjects.as_ref().map(|subjects| {
        subjects
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    });
    let rows = [
        ("provider", mentor.provider.clone()),
        ("model", mentor.model.clone()),
        ("name", mentor.name.clone()),
        ("level", mentor.level.map(|l| l.to_string())),
        ("subjects", subjects),
        ("mood", mentor.mood.map(|m| m.to_string())),
        (
            "audio_dir",
            mentor.audio_dir.as_ref().map(|d| d.display().to_string()),
        ),
    ];
    print_rows(&rows);

    println!("{}", Style::header("[voice]"));
    let rows = [
        ("lang", voice.lang.map(|l| l.to_string())),
        ("gender", voice.gender.map(|g| g.to_string())),
        ("speed", voice.speed.map(format_rate)),
    ];
    print_rows(&rows);

    println!("{}", Style::header("[speech]"));
    let speech = &config.speech;
    let key_state = if speech.get_api_key().is_some() {
        Style::success("(set)")
    } else {
        Style::warning(format!("(not set, export {})", speech.api_key_env()))
    };
    let rows = [
        ("region", speech.region.clone()),
        ("endpoint", speech.endpoint.clone()),
        ("format", speech.output_format.clone()),
    ];
    print_rows(&rows);
    println!("  {:10} {key_state}", Style::label("api_key"));
    println!();

    if config.providers.is_empty() {
        println!(
            "{} none configured, using built-in '{BUILTIN_PROVIDER}'",
            Style::header("[providers]")
        );
        return;
    }

    let mut names: Vec<_> = config.providers.keys().collect();
    names.sort_unstable();
    for name in names {
        let Some(provider) = config.providers.get(name) else {
            continue;
        };
        println!("{}", Style::header(format!("[providers.{name}]")));
        println!(
            "  {:10} {}",
            Style::label("endpoint"),
            Style::value(&provider.endpoint)
        );
        if !provider.models.is_empty() {
            println!(
                "  {:10} {}",
                Style::label("models"),
                Style::value(provider.models.join(", "))
            );
        }
    }
}

fn print_rows(rows: &[(&str, Option<String>)]) {
    for (key, value) in rows {
        println!(
            "  {:10} {}",
            Style::label(key),
            value.as_deref().map_or_else(not_set, Style::value)
        );
    }
    println!();
}

fn select_provider(config: &ConfigFile) -> Result<String> {
    let mut providers: Vec<String> = config.providers.keys().cloned().collect();
    if !providers.iter().any(|p| p == BUILTIN_PROVIDER) {
        providers.push(BUILTIN_PROVIDER.to_string());
    }
    providers.sort_unstable();

    let default_index = config
        .mentor
        .provider
        .as_deref()
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Chat provider:", providers)
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        let model = Text::new("Model:")
            .with_help_message("Enter the model name")
            .with_default(default.unwrap_or(DEFAULT_MODEL))
            .prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        return Ok(model.trim().to_string());
    }

    let default_index = default
        .and_then(|d| available_models.iter().position(|m| m == d))
        .unwrap_or(0);

    let selection = Select::new("Model:", available_models.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn prompt_name(default: Option<&str>) -> Result<Option<String>> {
    let mut prompt = Text::new("Learner name:").with_help_message("Leave empty to skip");
    if let Some(name) = default {
        prompt = prompt.with_default(name);
    }

    let name = prompt.prompt()?;
    let name = name.trim();
    Ok((!name.is_empty()).then(|| name.to_string()))
}

fn select_one<T>(message: &str, options: &[T], current: Option<T>) -> Result<T>
where
    T: Copy + PartialEq + std::fmt::Display,
{
    let default_index = current
        .and_then(|c| options.iter().position(|o| *o == c))
        .unwrap_or(0);

    let selection = Select::new(message, options.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_subjects(current: Option<&[Subject]>) -> Result<Vec<Subject>> {
    let defaults: Vec<usize> = current
        .unwrap_or_default()
        .iter()
        .filter_map(|s| Subject::ALL.iter().position(|o| o == s))
        .collect();

    let selection = MultiSelect::new("Subjects of interest:", Subject::ALL.to_vec())
        .with_default(&defaults)
        .prompt()?;

    Ok(selection)
}

fn select_speed(current: i32) -> Result<i32> {
    let speeds: Vec<i32> = (MIN_SPEED..=MAX_SPEED)
        .filter(|s| s % SPEED_STEP == 0)
        .collect();
    let labels: Vec<String> = speeds.iter().copied().map(format_rate).collect();

    let default_index = speeds.iter().position(|s| *s == current).unwrap_or(0);

    let selection = Select::new("Speech rate:", labels)
        .with_starting_cursor(default_index)
        .raw_prompt()?;

    Ok(speeds[selection.index])
}
