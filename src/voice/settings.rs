use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::profile::Level;

pub const MIN_SPEED: i32 = -50;
pub const MAX_SPEED: i32 = 50;
pub const SPEED_STEP: i32 = 10;

/// Language the answer is spoken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    #[serde(rename = "ko-KR")]
    #[value(name = "ko-KR")]
    KoKr,
    #[serde(rename = "en-US")]
    #[value(name = "en-US")]
    EnUs,
    #[serde(rename = "ja-JP")]
    #[value(name = "ja-JP")]
    JaJp,
    #[serde(rename = "zh-CN")]
    #[value(name = "zh-CN")]
    ZhCn,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::KoKr, Self::EnUs, Self::JaJp, Self::ZhCn];

    /// BCP 47 locale code, as the speech service expects it.
    pub const fn code(self) -> &'static str {
        match self {
            Self::KoKr => "ko-KR",
            Self::EnUs => "en-US",
            Self::JaJp => "ja-JP",
            Self::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unsupported voice language: '{s}'\n\n\
                     Supported languages: ko-KR, en-US, ja-JP, zh-CN\n\
                     Run 'mentor voices' to see all voices."
                )
            })
    }
}

/// Gender of the synthesis voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "여성",
            Self::Male => "남성",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" | "여성" => Ok(Self::Female),
            "male" | "m" | "남성" => Ok(Self::Male),
            other => bail!("Invalid gender: '{other}'\n\nValid values: female, male"),
        }
    }
}

/// Formats a speed offset as the signed percentage the speech service expects.
///
/// Zero renders as `+0%`.
pub fn format_rate(speed_offset: i32) -> String {
    if speed_offset < 0 {
        format!("{speed_offset}%")
    } else {
        format!("+{speed_offset}%")
    }
}

/// Parses and validates a speed offset: -50..=50 in steps of 10.
pub fn parse_speed(s: &str) -> Result<i32> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let value: i32 = number
        .strip_prefix('+')
        .unwrap_or(number)
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid speed: '{s}' is not a number"))?;

    validate_speed(value)
}

/// Checks that a speed offset lies on the -50..=50 grid.
pub fn validate_speed(value: i32) -> Result<i32> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&value) || value % SPEED_STEP != 0 {
        bail!(
            "Invalid speed: {value}\n\n\
             Speed must be between {MIN_SPEED} and {MAX_SPEED} in steps of {SPEED_STEP}."
        );
    }

    Ok(value)
}

/// Voice settings read when an answer is spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceConfig {
    pub language: Language,
    pub gender: Gender,
    pub speed: i32,
}

impl VoiceConfig {
    /// Starting voice for a learner level: a brighter, slightly faster voice for
    /// younger learners, a calmer one for teenagers.
    pub const fn default_for_level(level: Level) -> Self {
        match level {
            Level::Kindergarten | Level::Elementary => Self {
                language: Language::KoKr,
                gender: Gender::Female,
                speed: 10,
            },
            Level::MiddleSchool | Level::HighSchool => Self {
                language: Language::KoKr,
                gender: Gender::Male,
                speed: 0,
            },
        }
    }

    pub fn rate(&self) -> String {
        format_rate(self.speed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn is_rate_string(s: &str) -> bool {
        let Some(body) = s.strip_suffix('%') else {
            return false;
        };
        let Some(digits) = body.strip_prefix(['+', '-']) else {
            return false;
        };
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn test_format_rate_examples() {
        assert_eq!(format_rate(10), "+10%");
        assert_eq!(format_rate(-20), "-20%");
        assert_eq!(format_rate(0), "+0%");
    }

    #[test]
    fn test_format_rate_shape_and_sign_over_slider_range() {
        for offset in (MIN_SPEED..=MAX_SPEED).step_by(SPEED_STEP as usize) {
            let rate = format_rate(offset);
            assert!(is_rate_string(&rate), "bad rate string {rate}");
            if offset < 0 {
                assert!(rate.starts_with('-'));
            } else {
                assert!(rate.starts_with('+'));
            }
        }
    }

    #[test]
    fn test_parse_speed_accepts_steps() {
        assert_eq!(parse_speed("0").unwrap(), 0);
        assert_eq!(parse_speed("-50").unwrap(), -50);
        assert_eq!(parse_speed("+30").unwrap(), 30);
        assert_eq!(parse_speed("20%").unwrap(), 20);
        assert_eq!(parse_speed("+10%").unwrap(), 10);
    }

    #[test]
    fn test_parse_speed_rejects_off_step_and_out_of_range() {
        assert!(parse_speed("15").is_err());
        assert!(parse_speed("60").is_err());
        assert!(parse_speed("-60").is_err());
        assert!(parse_speed("fast").is_err());
    }

    #[test]
    fn test_language_parse_is_case_insensitive() {
        assert_eq!("ko-kr".parse::<Language>().unwrap(), Language::KoKr);
        assert_eq!("zh-CN".parse::<Language>().unwrap(), Language::ZhCn);
        assert!("fr-FR".parse::<Language>().is_err());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("남성".parse::<Gender>().unwrap(), Gender::Male);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_default_for_level() {
        let young = VoiceConfig::default_for_level(Level::Elementary);
        assert_eq!(young.gender, Gender::Female);
        assert_eq!(young.speed, 10);
        assert_eq!(young.rate(), "+10%");

        let teen = VoiceConfig::default_for_level(Level::HighSchool);
        assert_eq!(teen.language, Language::KoKr);
        assert_eq!(teen.gender, Gender::Male);
        assert_eq!(teen.rate(), "+0%");
    }
}
