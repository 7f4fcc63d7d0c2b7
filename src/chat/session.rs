use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::path::Path;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui::{self, ProviderInfo};
use crate::consultation::{ChatService, ConsultationSession, QuestionInput, SpeechService};
use crate::input::{ImageReader, InputReader};
use crate::profile::{Level, Mood, parse_subjects};
use crate::prompt::ImageAttachment;
use crate::ui::{Style, ask_with_progress, is_prompt_cancelled};
use crate::voice::{Gender, Language, VoiceConfig, format_rate, parse_speed};

const SET_KEYS: &str = "name, level, subjects, mood, lang, gender, speed, model";

/// An interactive consultation.
///
/// Wraps one [`ConsultationSession`]; every question typed here goes through
/// the same ask pipeline as `mentor ask`.
pub struct ChatSession<C, S> {
    session: ConsultationSession<C, S>,
    provider: ProviderInfo,
    pending_image: Option<ImageAttachment>,
}

impl<C: ChatService, S: SpeechService> ChatSession<C, S> {
    pub const fn new(session: ConsultationSession<C, S>, provider: ProviderInfo) -> Self {
        Self {
            session,
            provider,
            pending_image: None,
        }
    }

    pub const fn session(&self) -> &ConsultationSession<C, S> {
        &self.session
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.session.profile());

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let help = if self.pending_image.is_some() {
                "Image attached to the next question. /image clears it"
            } else {
                "Ask a question, /help for commands, Ctrl+C to quit"
            };

            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message(help)
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(SlashCommand::Transcript(path)) => {
                        self.ask_from_transcript(path.as_deref()).await;
                    }
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        self.ask(QuestionInput::text(text)).await;
                    }
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Runs one ask. Failures are shown and the loop goes on.
    async fn ask(&mut self, input: QuestionInput) {
        let input = match &self.pending_image {
            Some(image) => input.with_image(image.clone()),
            None => input,
        };

        match ask_with_progress(&mut self.session, &input).await {
            Ok(outcome) => {
                self.pending_image = None;
                ui::print_outcome(&outcome);
            }
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    async fn ask_from_transcript(&mut self, path: Option<&str>) {
        let Some(path) = path else {
            ui::print_error("Usage: /transcript <path>");
            return;
        };

        match InputReader::read_file(Path::new(path)) {
            Ok(transcript) => {
                self.ask(QuestionInput::default().with_transcript(transcript))
                    .await;
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    /// Handles a slash command. Returns `false` when the session should end.
    pub fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(
                    self.session.profile(),
                    self.session.voice(),
                    self.session.model(),
                    &self.provider,
                );
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::History => ui::print_history(self.session.log()),
            SlashCommand::Image(path) => self.set_image(path.as_deref()),
            SlashCommand::Quit => return false,
            SlashCommand::Reset => {
                self.session.restart();
                self.pending_image = None;
                ui::print_success("Started a new session");
                println!();
            }
            SlashCommand::Set { key, value } => {
                if let Err(e) = self.handle_set(&key, value.as_deref()) {
                    ui::print_error(&e.to_string());
                }
            }
            // handled by `run`
            SlashCommand::Transcript(_) => {}
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    fn set_image(&mut self, path: Option<&str>) {
        let Some(path) = path else {
            self.pending_image = None;
            ui::print_success("Image cleared");
            return;
        };

        match ImageReader::read(Path::new(path)) {
            Ok(image) => {
                self.pending_image = Some(image);
                ui::print_success(&format!(
                    "Image attached: {}",
                    Style::value(path)
                ));
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    fn handle_set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        if key.is_empty() {
            println!("Usage: /set <key> <value>");
            println!("Keys: {SET_KEYS}");
            return Ok(());
        }

        // Only `name` and `subjects` may be cleared.
        let required = || {
            value.ok_or_else(|| anyhow::anyhow!("Usage: /set {key} <value>"))
        };

        match key {
            "name" => {
                let name = value.unwrap_or_default().to_string();
                self.session.profile_mut().name = name;
                ui::print_success(&format!(
                    "Name set to {}",
                    Style::value(&self.session.profile().name)
                ));
            }
            "level" => {
                let level: Level = required()?.parse()?;
                self.set_level(level);
            }
            "subjects" => {
                let subjects = parse_subjects(value.unwrap_or_default())?;
                self.session.profile_mut().set_subjects(&subjects);
                ui::print_success(&format!(
                    "Subjects set to {}",
                    Style::value(self.session.profile().subject_labels())
                ));
            }
            "mood" => {
                let mood: Mood = required()?.parse()?;
                self.session.profile_mut().mood = mood;
                ui::print_success(&format!("Mood set to {}", Style::value(mood)));
            }
            "lang" => {
                let language: Language = required()?.parse()?;
                self.session.voice_mut().language = language;
                ui::print_success(&format!(
                    "Voice language set to {}",
                    Style::value(language)
                ));
            }
            "gender" => {
                let gender: Gender = required()?.parse()?;
                self.session.voice_mut().gender = gender;
                ui::print_success(&format!("Voice gender set to {}", Style::value(gender)));
            }
            "speed" => {
                let speed = parse_speed(required()?)?;
                self.session.voice_mut().speed = speed;
                ui::print_success(&format!(
                    "Speech rate set to {}",
                    Style::value(format_rate(speed))
                ));
            }
            "model" => {
                let model = required()?;
                self.session.set_model(model);
                ui::print_success(&format!("Model set to {}", Style::value(model)));
            }
            _ => anyhow::bail!("Unknown setting: {key}\nAvailable: {SET_KEYS}"),
        }

        Ok(())
    }

    /// Changes the level. A voice still on the old level's default moves to
    /// the new level's default; a customized voice is left alone.
    fn set_level(&mut self, level: Level) {
        let old_default = VoiceConfig::default_for_level(self.session.profile().level);
        if *self.session.voice() == old_default {
            *self.session.voice_mut() = VoiceConfig::default_for_level(level);
        }

        self.session.profile_mut().level = level;
        ui::print_success(&format!("Level set to {}", Style::value(level)));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::consultation::{ServiceFuture, SpeechRequest, TextStream};
    use crate::error::SessionError;
    use crate::profile::{LearnerProfile, Subject};
    use crate::prompt::PromptMessages;
    use std::path::PathBuf;

    struct Unreachable;

    impl ChatService for Unreachable {
        fn stream_reply<'a>(
            &'a self,
            _model: &'a str,
            _messages: &'a PromptMessages,
        ) -> ServiceFuture<'a, Result<TextStream, SessionError>> {
            Box::pin(async { Err(SessionError::ChatService("offline".to_string())) })
        }
    }

    impl SpeechService for Unreachable {
        fn synthesize<'a>(
            &'a self,
            _request: &'a SpeechRequest<'a>,
            _out_path: &'a Path,
        ) -> ServiceFuture<'a, Result<PathBuf, SessionError>> {
            Box::pin(async { Err(SessionError::SpeechService("offline".to_string())) })
        }
    }

    fn chat_session(level: Level) -> ChatSession<Unreachable, Unreachable> {
        let profile = LearnerProfile::new("", level, &[], Mood::Good);
        let session = ConsultationSession::new(
            profile,
            VoiceConfig::default_for_level(level),
            "gpt-4o".to_string(),
            PathBuf::from("/tmp/mentor-test-audio"),
            Unreachable,
            Unreachable,
        );
        ChatSession::new(
            session,
            ProviderInfo {
                name: "openai".to_string(),
                endpoint: "https://api.openai.com".to_string(),
            },
        )
    }

    fn set(chat: &mut ChatSession<Unreachable, Unreachable>, key: &str, value: &str) -> Result<()> {
        chat.handle_set(key, Some(value))
    }

    #[test]
    fn test_set_profile_fields() {
        let mut chat = chat_session(Level::Elementary);

        set(&mut chat, "name", "민준").unwrap();
        set(&mut chat, "subjects", "math, 과학").unwrap();
        set(&mut chat, "mood", "struggling").unwrap();

        let profile = chat.session().profile();
        assert_eq!(profile.name, "민준");
        assert_eq!(profile.subjects(), &[Subject::Math, Subject::Science]);
        assert_eq!(profile.mood, Mood::Struggling);
    }

    #[test]
    fn test_set_voice_fields() {
        let mut chat = chat_session(Level::Elementary);

        set(&mut chat, "lang", "en-us").unwrap();
        set(&mut chat, "gender", "남성").unwrap();
        set(&mut chat, "speed", "-30%").unwrap();

        let voice = chat.session().voice();
        assert_eq!(voice.language, Language::EnUs);
        assert_eq!(voice.gender, Gender::Male);
        assert_eq!(voice.speed, -30);
    }

    #[test]
    fn test_set_rejects_bad_values_and_keeps_state() {
        let mut chat = chat_session(Level::Elementary);
        let before = *chat.session().voice();

        assert!(set(&mut chat, "speed", "15").is_err());
        assert!(set(&mut chat, "lang", "fr-FR").is_err());
        assert!(set(&mut chat, "level", "college").is_err());
        assert!(chat.handle_set("gender", None).is_err());
        assert!(set(&mut chat, "volume", "10").is_err());

        assert_eq!(*chat.session().voice(), before);
        assert_eq!(chat.session().profile().level, Level::Elementary);
    }

    #[test]
    fn test_level_change_moves_default_voice() {
        let mut chat = chat_session(Level::Elementary);

        set(&mut chat, "level", "high-school").unwrap();
        assert_eq!(
            *chat.session().voice(),
            VoiceConfig::default_for_level(Level::HighSchool)
        );
    }

    #[test]
    fn test_level_change_keeps_custom_voice() {
        let mut chat = chat_session(Level::Elementary);
        set(&mut chat, "speed", "30").unwrap();

        set(&mut chat, "level", "중학생").unwrap();
        assert_eq!(chat.session().profile().level, Level::MiddleSchool);
        assert_eq!(chat.session().voice().speed, 30);
        assert_eq!(chat.session().voice().gender, Gender::Female);
    }

    #[test]
    fn test_set_model() {
        let mut chat = chat_session(Level::Elementary);
        set(&mut chat, "model", "gpt-4o-mini").unwrap();
        assert_eq!(chat.session().model(), "gpt-4o-mini");
    }

    #[test]
    fn test_quit_ends_session() {
        let mut chat = chat_session(Level::Elementary);
        assert!(chat.handle_command(SlashCommand::Help));
        assert!(chat.handle_command(SlashCommand::History));
        assert!(!chat.handle_command(SlashCommand::Quit));
    }

    #[test]
    fn test_image_attach_and_clear() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("worksheet.jpg");
        std::fs::write(&path, b"\xff\xd8\xff").unwrap();

        let mut chat = chat_session(Level::Elementary);
        chat.handle_command(SlashCommand::Image(Some(path.display().to_string())));
        assert_eq!(
            chat.pending_image.as_ref().map(|i| i.mime_type.as_str()),
            Some("image/jpeg")
        );

        chat.handle_command(SlashCommand::Image(None));
        assert!(chat.pending_image.is_none());
    }

    #[tokio::test]
    async fn test_failed_ask_keeps_log_and_image() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("page.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let mut chat = chat_session(Level::Elementary);
        chat.handle_command(SlashCommand::Image(Some(path.display().to_string())));

        chat.ask(QuestionInput::text("분수가 뭐예요?")).await;

        assert!(chat.session().log().is_empty());
        assert!(chat.pending_image.is_some());
    }
}
