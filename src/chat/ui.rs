//! Chat mode UI components.

use crate::consultation::{AskOutcome, ConversationLog, QuestionSource};
use crate::profile::LearnerProfile;
use crate::ui::Style;
use crate::voice::{VoiceConfig, resolve_voice};

use super::command::SLASH_COMMANDS;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Provider details shown by `/config`.
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub name: String,
    pub endpoint: String,
}

pub fn print_header(profile: &LearnerProfile) {
    println!(
        "{} {} - Learning Consultation",
        Style::header("mentor"),
        Style::version(format!("v{VERSION}"))
    );

    let greeting = if profile.name.trim().is_empty() {
        "안녕하세요!".to_string()
    } else {
        format!("{}님, 안녕하세요!", profile.name.trim())
    };
    println!("{}", Style::secondary(greeting));
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(
    profile: &LearnerProfile,
    voice: &VoiceConfig,
    model: &str,
    provider: &ProviderInfo,
) {
    let name = if profile.name.trim().is_empty() {
        Style::secondary("(not set)")
    } else {
        Style::value(&profile.name)
    };
    let subjects = if profile.subjects().is_empty() {
        Style::secondary("(none)")
    } else {
        Style::value(profile.subject_labels())
    };
    let voice_id =
        resolve_voice(voice.language, voice.gender).map_or_else(Style::error, Style::secondary);

    println!("{}", Style::header("Learner"));
    println!("  {}      {name}", Style::label("name"));
    println!("  {}     {}", Style::label("level"), Style::value(profile.level));
    println!("  {}  {subjects}", Style::label("subjects"));
    println!("  {}      {}", Style::label("mood"), Style::value(profile.mood));
    println!();

    println!("{}", Style::header("Voice"));
    println!(
        "  {}      {}",
        Style::label("lang"),
        Style::value(voice.language)
    );
    println!(
        "  {}    {}",
        Style::label("gender"),
        Style::value(voice.gender)
    );
    println!("  {}     {}", Style::label("speed"), Style::value(voice.rate()));
    println!("  {}     {voice_id}", Style::label("voice"));
    println!();

    println!("{}", Style::header("Provider"));
    println!(
        "  {}  {}",
        Style::label("provider"),
        Style::value(&provider.name)
    );
    println!("  {}     {}", Style::label("model"), Style::value(model));
    println!(
        "  {}  {}",
        Style::label("endpoint"),
        Style::secondary(&provider.endpoint)
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    for (command, description) in SLASH_COMMANDS {
        println!(
            "  {:12} {}",
            Style::command(command),
            Style::secondary(description)
        );
    }
    println!();
    println!(
        "{}",
        Style::secondary("Anything else is asked as a question.")
    );
    println!();
}

/// One block per exchange, oldest first.
pub fn history_lines(log: &ConversationLog) -> Vec<String> {
    let mut lines = Vec::new();

    for (index, exchange) in log.exchanges().iter().enumerate() {
        let profile = exchange.profile();
        let context = if profile.subjects().is_empty() {
            profile.level.to_string()
        } else {
            format!("{} · {}", profile.level, profile.subject_labels())
        };

        lines.push(format!(
            "{} {} {}",
            Style::label(format!("{}.", index + 1)),
            Style::question(exchange.question()),
            Style::secondary(format!("[{context}]"))
        ));
        lines.extend(exchange.answer().lines().map(|line| format!("   {line}")));
    }

    lines
}

pub fn print_history(log: &ConversationLog) {
    if log.is_empty() {
        println!("{}", Style::secondary("No questions yet."));
        println!();
        return;
    }

    println!(
        "{} {}",
        Style::header("Today's consultation"),
        Style::secondary(format!("({})", log.len()))
    );
    for line in history_lines(log) {
        println!("{line}");
    }
    println!();
}

pub fn print_outcome(outcome: &AskOutcome) {
    if outcome.source == QuestionSource::Transcript {
        println!(
            "{} {}",
            Style::label("heard"),
            Style::question(&outcome.question)
        );
    }
    println!(
        "{} {}",
        Style::label("audio"),
        Style::secondary(outcome.audio_path.display())
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
