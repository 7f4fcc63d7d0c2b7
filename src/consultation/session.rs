use futures_util::StreamExt;
use std::path::{Path, PathBuf};

use super::history::ConversationLog;
use super::ports::{ChatService, SpeechRequest, SpeechService};
use super::question::{QuestionInput, QuestionSource};
use crate::error::SessionError;
use crate::profile::LearnerProfile;
use crate::prompt::{PromptMessages, compose_prompt};
use crate::speech::audio_file_name;
use crate::voice::{VoiceConfig, resolve_voice};

/// Progress reported while an ask runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskEvent<'a> {
    /// A piece of the answer as it streams in.
    Chunk(&'a str),
    /// The answer is complete and is being synthesized.
    Speaking,
}

/// Result of a completed ask.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub source: QuestionSource,
    pub question: String,
    pub answer: String,
    pub audio_path: PathBuf,
}

/// State owned by one learner's consultation.
///
/// Created when the session starts and dropped when it ends; the log never
/// outlives it.
pub struct ConsultationSession<C, S> {
    profile: LearnerProfile,
    voice: VoiceConfig,
    model: String,
    audio_dir: PathBuf,
    log: ConversationLog,
    chat: C,
    speech: S,
}

impl<C: ChatService, S: SpeechService> ConsultationSession<C, S> {
    pub fn new(
        profile: LearnerProfile,
        voice: VoiceConfig,
        model: String,
        audio_dir: PathBuf,
        chat: C,
        speech: S,
    ) -> Self {
        Self {
            profile,
            voice,
            model,
            audio_dir,
            log: ConversationLog::new(),
            chat,
            speech,
        }
    }

    pub const fn profile(&self) -> &LearnerProfile {
        &self.profile
    }

    pub const fn profile_mut(&mut self) -> &mut LearnerProfile {
        &mut self.profile
    }

    pub const fn voice(&self) -> &VoiceConfig {
        &self.voice
    }

    pub const fn voice_mut(&mut self) -> &mut VoiceConfig {
        &mut self.voice
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    pub const fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Starts over with an empty log. Profile and voice settings are kept.
    pub fn restart(&mut self) {
        self.log = ConversationLog::new();
    }

    /// Runs one ask: pick the question, ask the mentor, speak the answer,
    /// then record the exchange.
    ///
    /// `on_event` sees the answer as it streams in and is told when speech
    /// starts. Nothing is recorded unless both the chat and the speech call
    /// succeed.
    pub async fn ask<F>(
        &mut self,
        input: &QuestionInput,
        mut on_event: F,
    ) -> Result<AskOutcome, SessionError>
    where
        F: FnMut(AskEvent<'_>),
    {
        let (source, question) = input.resolve()?;
        let profile = self.profile.clone();

        let messages = compose_prompt(&profile, question, input.image.as_ref());
        let answer = self.fetch_answer(&messages, &mut on_event).await?;
        on_event(AskEvent::Speaking);
        let audio_path = self.speak(&answer).await?;

        self.log.record(&profile, question, answer.as_str());
        tracing::debug!(entries = self.log.len(), "exchange recorded");

        Ok(AskOutcome {
            source,
            question: question.to_string(),
            answer,
            audio_path,
        })
    }

    async fn fetch_answer<F>(
        &self,
        messages: &PromptMessages,
        on_event: &mut F,
    ) -> Result<String, SessionError>
    where
        F: FnMut(AskEvent<'_>),
    {
        let mut stream = self.chat.stream_reply(&self.model, messages).await?;
        let mut answer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            on_event(AskEvent::Chunk(&chunk));
            answer.push_str(&chunk);
        }

        if answer.trim().is_empty() {
            return Err(SessionError::ChatService(
                "The model returned an empty reply".to_string(),
            ));
        }

        Ok(answer)
    }

    /// Speaks `text` with the voice settings as they are right now.
    pub async fn speak(&self, text: &str) -> Result<PathBuf, SessionError> {
        let voice = resolve_voice(self.voice.language, self.voice.gender)?;
        let request = SpeechRequest {
            text,
            language: self.voice.language.code(),
            voice,
            rate: self.voice.rate(),
        };

        let out_path = self
            .audio_dir
            .join(audio_file_name(&request, self.speech.audio_extension()));

        self.speech.synthesize(&request, &out_path).await
    }
}
