//! Seams between a consultation session and the hosted services it calls.

use futures_util::Stream;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::error::SessionError;
use crate::prompt::PromptMessages;
use crate::voice::VoiceId;

pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Reply text as it arrives, chunk by chunk.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, SessionError>> + Send>>;

/// A chat-completion backend.
pub trait ChatService: Send + Sync {
    fn stream_reply<'a>(
        &'a self,
        model: &'a str,
        messages: &'a PromptMessages,
    ) -> ServiceFuture<'a, Result<TextStream, SessionError>>;
}

/// What to say and how to say it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest<'a> {
    pub text: &'a str,
    pub language: &'a str,
    pub voice: VoiceId,
    pub rate: String,
}

/// A speech-synthesis backend that writes audio to the given path.
pub trait SpeechService: Send + Sync {
    fn synthesize<'a>(
        &'a self,
        request: &'a SpeechRequest<'a>,
        out_path: &'a Path,
    ) -> ServiceFuture<'a, Result<PathBuf, SessionError>>;

    /// File extension of the audio this service produces.
    fn audio_extension(&self) -> &'static str {
        "mp3"
    }
}
