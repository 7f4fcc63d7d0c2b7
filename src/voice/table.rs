//! The fixed table of synthesis voices.

use std::fmt;

use super::settings::{Gender, Language};
use crate::error::SessionError;
use crate::ui::Style;

/// Identifier of a neural voice understood by the speech service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(&'static str);

impl VoiceId {
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VoiceEntry {
    pub language: Language,
    pub gender: Gender,
    pub voice: VoiceId,
}

const fn entry(language: Language, gender: Gender, voice: &'static str) -> VoiceEntry {
    VoiceEntry {
        language,
        gender,
        voice: VoiceId(voice),
    }
}

/// Supported (language, gender) pairs and their voices.
pub const VOICES: &[VoiceEntry] = &[
    entry(Language::KoKr, Gender::Female, "ko-KR-SunHiNeural"),
    entry(Language::KoKr, Gender::Male, "ko-KR-InJoonNeural"),
    entry(Language::EnUs, Gender::Female, "en-US-JennyNeural"),
    entry(Language::EnUs, Gender::Male, "en-US-GuyNeural"),
    entry(Language::JaJp, Gender::Female, "ja-JP-NanamiNeural"),
    entry(Language::JaJp, Gender::Male, "ja-JP-KeitaNeural"),
    entry(Language::ZhCn, Gender::Female, "zh-CN-XiaoxiaoNeural"),
    entry(Language::ZhCn, Gender::Male, "zh-CN-YunxiNeural"),
];

/// Looks up the voice for a language and gender.
///
/// # Errors
///
/// Returns [`SessionError::UnsupportedVoice`] when the pair is not in [`VOICES`].
pub fn resolve_voice(language: Language, gender: Gender) -> Result<VoiceId, SessionError> {
    lookup(VOICES, language, gender)
}

fn lookup(
    table: &[VoiceEntry],
    language: Language,
    gender: Gender,
) -> Result<VoiceId, SessionError> {
    table
        .iter()
        .find(|e| e.language == language && e.gender == gender)
        .map(|e| e.voice)
        .ok_or_else(|| SessionError::UnsupportedVoice {
            language: language.to_string(),
            gender: gender.to_string(),
        })
}

/// Prints the voice table to stdout.
pub fn print_voices() {
    println!("{}", Style::header("Available voices"));
    for e in VOICES {
        println!(
            "  {:6} {:7} {}",
            Style::code(e.language),
            Style::label(e.gender),
            Style::value(e.voice)
        );
    }
}
