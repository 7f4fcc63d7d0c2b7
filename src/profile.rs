//! Learner profile: who is asking, at what level, about what, and how they feel.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// School level of the learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    #[default]
    Kindergarten,
    Elementary,
    MiddleSchool,
    HighSchool,
}

impl Level {
    pub const ALL: [Self; 4] = [
        Self::Kindergarten,
        Self::Elementary,
        Self::MiddleSchool,
        Self::HighSchool,
    ];

    /// Korean label used in prompts and display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kindergarten => "유치원",
            Self::Elementary => "초등학생",
            Self::MiddleSchool => "중학생",
            Self::HighSchool => "고등학생",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Kindergarten => "kindergarten",
            Self::Elementary => "elementary",
            Self::MiddleSchool => "middle-school",
            Self::HighSchool => "high-school",
        }
    }
}

/// Subject the learner is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Math,
    Science,
    Korean,
    English,
}

impl Subject {
    pub const ALL: [Self; 4] = [Self::Math, Self::Science, Self::Korean, Self::English];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Math => "수학",
            Self::Science => "과학",
            Self::Korean => "국어",
            Self::English => "영어",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::Korean => "korean",
            Self::English => "english",
        }
    }
}

/// How the learner feels today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    #[default]
    Good,
    Neutral,
    Struggling,
}

impl Mood {
    pub const ALL: [Self; 3] = [Self::Good, Self::Neutral, Self::Struggling];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "괜찮아요",
            Self::Neutral => "보통이에요",
            Self::Struggling => "좀 힘들어요",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Struggling => "struggling",
        }
    }
}

macro_rules! impl_label_parsing {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = anyhow::Error;

            /// Accepts either the English key (`middle-school`) or the Korean label (`중학생`).
            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| v.key().eq_ignore_ascii_case(s) || v.label() == s)
                    .ok_or_else(|| {
                        let valid: Vec<_> = Self::ALL.iter().map(|v| v.key()).collect();
                        anyhow::anyhow!(
                            "Invalid {}: '{s}'\n\nValid values: {}",
                            $what,
                            valid.join(", ")
                        )
                    })
            }
        }
    };
}

impl_label_parsing!(Level, "level");
impl_label_parsing!(Subject, "subject");
impl_label_parsing!(Mood, "mood");

/// Parses a comma-separated subject list, dropping duplicates but keeping order.
pub fn parse_subjects(input: &str) -> Result<Vec<Subject>> {
    let mut subjects = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        push_unique(&mut subjects, part.parse()?);
    }
    Ok(subjects)
}

fn push_unique(subjects: &mut Vec<Subject>, subject: Subject) {
    if !subjects.contains(&subject) {
        subjects.push(subject);
    }
}

/// The learner asking questions in a session.
///
/// A copy is taken for every recorded exchange, so later edits never rewrite history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnerProfile {
    pub name: String,
    pub level: Level,
    subjects: Vec<Subject>,
    pub mood: Mood,
}

impl LearnerProfile {
    pub fn new(name: impl Into<String>, level: Level, subjects: &[Subject], mood: Mood) -> Self {
        let mut profile = Self {
            name: name.into(),
            level,
            subjects: Vec::new(),
            mood,
        };
        profile.set_subjects(subjects);
        profile
    }

    /// Subjects in the order the learner listed them.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn set_subjects(&mut self, subjects: &[Subject]) {
        self.subjects.clear();
        for subject in subjects {
            push_unique(&mut self.subjects, *subject);
        }
    }

    /// Korean subject labels joined for display and prompts.
    pub fn subject_labels(&self) -> String {
        self.subjects
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parses_key_and_label() {
        assert_eq!("elementary".parse::<Level>().unwrap(), Level::Elementary);
        assert_eq!("Middle-School".parse::<Level>().unwrap(), Level::MiddleSchool);
        assert_eq!("고등학생".parse::<Level>().unwrap(), Level::HighSchool);
    }

    #[test]
    fn test_level_parse_invalid() {
        let err = "university".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("Invalid level"));
        assert!(err.to_string().contains("kindergarten"));
    }

    #[test]
    fn test_mood_labels() {
        assert_eq!(Mood::Struggling.to_string(), "좀 힘들어요");
        assert_eq!("보통이에요".parse::<Mood>().unwrap(), Mood::Neutral);
    }

    #[test]
    fn test_parse_subjects_dedupes_and_keeps_order() {
        let subjects = parse_subjects("science, math,science ,수학").unwrap();
        assert_eq!(subjects, vec![Subject::Science, Subject::Math]);
    }

    #[test]
    fn test_parse_subjects_empty() {
        assert!(parse_subjects("").unwrap().is_empty());
        assert!(parse_subjects(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_subjects_invalid() {
        assert!(parse_subjects("math, art").is_err());
    }

    #[test]
    fn test_profile_subject_labels() {
        let profile = LearnerProfile::new(
            "민지",
            Level::Elementary,
            &[Subject::Math, Subject::English, Subject::Math],
            Mood::Good,
        );
        assert_eq!(profile.subjects(), &[Subject::Math, Subject::English]);
        assert_eq!(profile.subject_labels(), "수학, 영어");
    }

    #[test]
    fn test_profile_defaults_match_first_options() {
        let profile = LearnerProfile::default();
        assert_eq!(profile.level, Level::Kindergarten);
        assert_eq!(profile.mood, Mood::Good);
        assert!(profile.subjects().is_empty());
    }
}
