use anyhow::Result;
use std::path::PathBuf;

use crate::chat::ui;
use crate::config::ResolveOptions;
use crate::consultation::{QuestionInput, QuestionSource};
use crate::error::CommandError;
use crate::input::{ImageReader, InputReader};
use crate::ui::{Style, ask_with_progress};

use super::{load_config, open_session};

pub struct AskOptions {
    /// Typed question; `-` reads stdin.
    pub question: Option<String>,
    pub transcript: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub resolve: ResolveOptions,
}

/// Asks one question, speaks the answer, and prints the session log.
pub async fn run_ask(options: AskOptions) -> Result<()> {
    let input = read_question_input(&options)?;

    // Fail on missing input before touching config or the network.
    let (source, _) = input.resolve()?;
    if source == QuestionSource::Transcript && options.question.is_some() {
        crate::info!(
            "{} Using the transcript; the typed question is ignored",
            Style::secondary("note:")
        );
    }

    let resolved = load_config(&options.resolve)?;
    let mut session = open_session(resolved)?;

    let outcome = ask_with_progress(&mut session, &input).await?;

    println!();
    println!("{} {}", Style::label("audio"), outcome.audio_path.display());

    crate::status!();
    for line in ui::history_lines(session.log()) {
        crate::status!("{line}");
    }

    Ok(())
}

fn read_question_input(options: &AskOptions) -> Result<QuestionInput> {
    let text = match options.question.as_deref() {
        Some("-") => Some(InputReader::read_stdin().map_err(CommandError::Input)?),
        other => other.map(str::to_string),
    };

    let transcript = options
        .transcript
        .as_deref()
        .map(InputReader::read)
        .transpose()
        .map_err(CommandError::Input)?;

    let image = options
        .image
        .as_deref()
        .map(ImageReader::read)
        .transpose()
        .map_err(CommandError::Input)?;

    Ok(QuestionInput {
        transcript,
        text,
        image,
    })
}
