//! Errors surfaced by a consultation session.

use thiserror::Error;

/// Everything that can go wrong while asking the mentor a question.
///
/// Each variant is shown to the learner as-is; none are retried.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please type or say a question first.")]
    MissingInput,

    #[error("No synthesis voice for language '{language}' and gender '{gender}'")]
    UnsupportedVoice { language: String, gender: String },

    #[error("Chat service failed: {0}")]
    ChatService(String),

    #[error("Speech service failed: {0}")]
    SpeechService(String),
}

impl SessionError {
    /// Process exit code for this error when it ends a one-shot command.
    pub const fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::MissingInput | Self::UnsupportedVoice { .. } => exitcode::USAGE,
            Self::ChatService(_) | Self::SpeechService(_) => exitcode::UNAVAILABLE,
        }
    }
}

/// Failures outside a session that still need their own exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or broken configuration.
    #[error("{0:#}")]
    Config(anyhow::Error),

    /// A file or value the user supplied could not be used.
    #[error("{0:#}")]
    Input(anyhow::Error),
}

/// Maps an application error to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(session) = err.downcast_ref::<SessionError>() {
        return session.exit_code();
    }

    match err.downcast_ref::<CommandError>() {
        Some(CommandError::Config(_)) => exitcode::CONFIG,
        Some(CommandError::Input(_)) => exitcode::USAGE,
        None => exitcode::SOFTWARE,
    }
}
